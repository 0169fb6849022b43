use eframe::egui::{self, Color32};

use super::super::{tasks, BlogboardApp};

/// Absolute image URLs pass through; anything else hangs off the API base.
pub(crate) fn resolve_image_url(base_url: &str, img: &str) -> String {
    if img.starts_with("http://") || img.starts_with("https://") {
        img.to_string()
    } else if img.starts_with('/') {
        format!("{base_url}{img}")
    } else {
        format!("{base_url}/{img}")
    }
}

impl BlogboardApp {
    pub(crate) fn render_post_image(&mut self, ui: &mut egui::Ui, img: &str, alt: &str, max_width: f32) {
        let url = resolve_image_url(self.api.base_url(), img);

        if let Some(pending) = self.image_pending.remove(&url) {
            let color = egui::ColorImage::from_rgba_unmultiplied(pending.size, &pending.pixels);
            let texture = ui
                .ctx()
                .load_texture(url.as_str(), color, egui::TextureOptions::default());
            self.image_textures.insert(url.clone(), texture);
        }

        if let Some(texture) = self.image_textures.get(&url) {
            ui.add(egui::Image::from_texture(texture).max_width(max_width))
                .on_hover_text(alt);
        } else if let Some(err) = self.image_errors.get(&url) {
            ui.colored_label(Color32::LIGHT_RED, format!("Image failed: {err}"));
            ui.hyperlink_to(alt, &url);
        } else {
            if self.image_loading.insert(url.clone()) {
                tasks::download_image(self.api.clone(), self.outbox.clone(), url);
            }
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Loading image…");
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_urls_resolve_against_base() {
        let base = "http://127.0.0.1:8080";
        assert_eq!(
            resolve_image_url(base, "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(
            resolve_image_url(base, "/uploads/a.png"),
            "http://127.0.0.1:8080/uploads/a.png"
        );
        assert_eq!(
            resolve_image_url(base, "uploads/a.png"),
            "http://127.0.0.1:8080/uploads/a.png"
        );
    }
}
