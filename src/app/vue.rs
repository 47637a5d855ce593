// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Chaque bouton produit un nom d’action du noyau (table PAVE)
// - Historique : filtre, effacement, clic = réinsertion du résultat
//
// Note :
// - Libellés limités aux glyphes couverts par les polices egui par défaut
//   (pas de ∛ ⌈ ⌊ : libellés texte à la place).

use eframe::egui;

use super::etat::AppCalc;
use super::theme::Theme;
use crate::noyau::{formater_resultat, Mode, ModeAngle};

/// (libellé, action). Action vide = case vide.
const PAVE: [[(&str, &str); 5]; 11] = [
    [("sin", "sin"), ("cos", "cos"), ("tan", "tan"), ("π", "pi"), ("e", "e")],
    [("asin", "asin"), ("acos", "acos"), ("atan", "atan"), ("φ", "phi"), ("ans", "ans")],
    [("ln", "log"), ("log", "log10"), ("log2", "log2"), ("√", "sqrt"), ("cbrt", "cbrt")],
    [("x²", "square"), ("x³", "cube"), ("x^y", "^"), ("pow", "pow"), ("e^x", "exp")],
    [("|x|", "abs"), ("ceil", "ceil"), ("floor", "floor"), ("round", "round"), ("n!", "factorial")],
    [("1/x", "reciprocal"), ("%", "percent"), ("(", "("), (")", ")"), (",", ",")],
    [("MC", "memory-clear"), ("MR", "memory-recall"), ("M+", "memory-add"), ("M−", "memory-subtract"), ("±", "negate")],
    [("7", "7"), ("8", "8"), ("9", "9"), ("÷", "÷"), ("DEL", "backspace")],
    [("4", "4"), ("5", "5"), ("6", "6"), ("×", "×"), ("CE", "clear-entry")],
    [("1", "1"), ("2", "2"), ("3", "3"), ("−", "−"), ("C", "clear")],
    [("0", "0"), (".", "."), ("=", "equals"), ("+", "+"), ("", "")],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_barre(ui);
                ui.add_space(6.0);

                self.ui_ecran(ui);

                ui.add_space(8.0);
                self.ui_pave(ui, maintenant);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    fn ui_barre(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Calculatrice");
            ui.separator();

            let angle = match self.calc.angle() {
                ModeAngle::Radians => "RAD",
                ModeAngle::Degres => "DEG",
            };
            if ui
                .button(angle)
                .on_hover_text("Basculer radians / degrés")
                .clicked()
            {
                self.basculer_angle();
            }

            let theme = match self.theme {
                Theme::Clair => "☀",
                Theme::Sombre => "🌙",
            };
            if ui.button(theme).on_hover_text("Thème clair / sombre").clicked() {
                self.basculer_theme();
                ui.ctx().set_visuals(self.theme.visuals());
            }

            if self.calc.memoire() != 0.0 {
                ui.monospace(format!("M = {}", formater_resultat(self.calc.memoire())));
            }
        });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        // ligne du haut : expression en cours, ou dernière expression évaluée
        let haut = match (self.calc.mode(), self.historique.entrees().first()) {
            (Mode::Resultat, Some(e)) if self.calc.dernier_resultat().is_some() => {
                format!("{} =", e.expression)
            }
            _ => String::new(),
        };

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.monospace(haut);
                ui.label(egui::RichText::new(self.affichage()).monospace().size(28.0));
            });

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for (label, action) in rangee {
                        self.bouton(ui, label, action, maintenant);
                    }
                    ui.end_row();
                }
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, label: &str, action: &str, maintenant: f64) {
        if action.is_empty() {
            ui.label("");
            return;
        }
        let resp = ui.add_sized([56.0, 32.0], egui::Button::new(label));
        if resp.clicked() {
            self.action(action, maintenant);
        }
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Historique")
            .default_open(true)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Filtre :");
                    ui.text_edit_singleline(&mut self.filtre_historique);
                    if ui.button("Effacer").clicked() {
                        self.historique.effacer();
                    }
                });

                if self.historique.is_empty() {
                    ui.monospace("vide");
                    return;
                }

                let mut choisi = None;
                for e in self.historique.rechercher(&self.filtre_historique) {
                    let texte = format!("{} = {}", e.expression, formater_resultat(e.result));
                    let resp = ui
                        .add(egui::Button::new(egui::RichText::new(texte).monospace()).frame(false))
                        .on_hover_text("Insérer ce résultat");
                    if resp.clicked() {
                        choisi = Some(e.result);
                    }
                }
                if let Some(v) = choisi {
                    self.inserer_resultat(v);
                }
            });
    }
}
