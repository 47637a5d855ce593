// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (état, vue, clavier, historique, thème)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB), persistance comprise

pub mod clavier;
pub mod etat;
pub mod historique;
pub mod theme;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use std::time::Duration;

use eframe::egui;

impl AppCalc {
    /// Création (natif + web) : relit le stockage local, applique le thème.
    pub fn nouvelle(cc: &eframe::CreationContext<'_>) -> Self {
        let app = cc.storage.map(AppCalc::charger).unwrap_or_default();
        cc.egui_ctx.set_visuals(app.theme.visuals());
        app
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let maintenant = ctx.input(|i| i.time);

        // Clavier global (hors champ texte) : traduit en actions du noyau.
        for action in clavier::actions_clavier(ctx) {
            self.action(&action, maintenant);
        }

        // Erreur affichée : on repeint pour qu’elle disparaisse à temps.
        if self.expirer_erreur(maintenant) {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui, maintenant);
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.sauver(storage);
    }
}
