// src/app.rs
//
// Grapheur d’échelons: module App (racine)
// -----------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppGrapheur (pour main.rs: use crate::app::AppGrapheur;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Enter/Plot sont gérés dans vue.rs (quand un champ a le focus).

pub mod etat;
pub mod vue;

pub use etat::AppGrapheur;

use eframe::egui;

impl eframe::App for AppGrapheur {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = effacer seulement le champ fonction (comme bouton "C").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_entree();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
