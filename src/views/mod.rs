//! Tera templates compiled into the binary.

use tera::{Context, Tera};

pub mod filters;

const TEMPLATES: &[(&str, &str)] = &[
    ("layouts/main.html", include_str!("../../templates/layouts/main.html")),
    ("pages/home.html", include_str!("../../templates/pages/home.html")),
    ("pages/venues.html", include_str!("../../templates/pages/venues.html")),
    ("pages/show_venue.html", include_str!("../../templates/pages/show_venue.html")),
    ("pages/search_venues.html", include_str!("../../templates/pages/search_venues.html")),
    ("pages/artists.html", include_str!("../../templates/pages/artists.html")),
    ("pages/show_artist.html", include_str!("../../templates/pages/show_artist.html")),
    ("pages/search_artists.html", include_str!("../../templates/pages/search_artists.html")),
    ("pages/shows.html", include_str!("../../templates/pages/shows.html")),
    ("forms/venue_fields.html", include_str!("../../templates/forms/venue_fields.html")),
    ("forms/new_venue.html", include_str!("../../templates/forms/new_venue.html")),
    ("forms/edit_venue.html", include_str!("../../templates/forms/edit_venue.html")),
    ("forms/artist_fields.html", include_str!("../../templates/forms/artist_fields.html")),
    ("forms/new_artist.html", include_str!("../../templates/forms/new_artist.html")),
    ("forms/edit_artist.html", include_str!("../../templates/forms/edit_artist.html")),
    ("forms/new_show.html", include_str!("../../templates/forms/new_show.html")),
    ("errors/404.html", include_str!("../../templates/errors/404.html")),
    ("errors/500.html", include_str!("../../templates/errors/500.html")),
];

pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        tera.autoescape_on(vec![".html"]);
        tera.register_filter("datetime", filters::datetime);

        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(template, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_compile() {
        let views = Views::new().unwrap();
        for (name, _) in TEMPLATES {
            assert!(
                views.tera.get_template_names().any(|n| n == *name),
                "missing template {name}"
            );
        }
    }

    #[test]
    fn test_output_is_escaped() {
        let views = Views::new().unwrap();
        let mut context = Context::new();
        context.insert("messages", &vec!["<script>alert(1)</script>".to_string()]);

        let html = views.render("pages/home.html", &context).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
