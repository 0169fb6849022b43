use std::time::{Duration, Instant};

use eframe::egui::{self, Align2, Color32, RichText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
    expires_at: Instant,
}

/// Short-lived notifications stacked in the bottom-right corner.
pub struct Toasts {
    items: Vec<Toast>,
    lifetime: Duration,
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: Vec::new(),
            lifetime,
        }
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(ToastKind::Success, text.into(), Instant::now());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(ToastKind::Error, text.into(), Instant::now());
    }

    fn push(&mut self, kind: ToastKind, text: String, now: Instant) {
        self.items.push(Toast {
            kind,
            text,
            expires_at: now + self.lifetime,
        });
    }

    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|toast| toast.expires_at > now);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn render(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.prune(now);
        if self.items.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
            .show(ctx, |ui| {
                for (idx, toast) in self.items.iter().enumerate() {
                    let (fill, icon) = match toast.kind {
                        ToastKind::Success => (Color32::from_rgb(34, 120, 60), "✔"),
                        ToastKind::Error => (Color32::from_rgb(160, 40, 40), "⚠"),
                    };
                    egui::Frame::popup(ui.style()).fill(fill).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(format!("{icon} {}", toast.text)).color(Color32::WHITE));
                            if ui.small_button("✖").clicked() {
                                dismissed = Some(idx);
                            }
                        });
                    });
                    ui.add_space(4.0);
                }
            });

        if let Some(idx) = dismissed {
            self.items.remove(idx);
        }

        // Wake up again when the next toast expires.
        if let Some(next) = self.items.iter().map(|toast| toast.expires_at).min() {
            ctx.request_repaint_after(next.saturating_duration_since(now));
        }
    }
}
