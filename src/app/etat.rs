//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : réunir l’état de la calculatrice (noyau), l’historique, le thème et
//! l’erreur affichée, et offrir les opérations que la vue déclenche.
//!
//! Contrats :
//! - Aucun dessin ici.
//! - Le noyau est le seul à évaluer ; l’état ne fait que router les actions.
//! - Erreur transitoire : effacée après `ERREUR_DUREE_S` secondes.

use chrono::Utc;
use tracing::warn;

use super::historique::Historique;
use super::theme::Theme;
use crate::noyau::{formater_resultat, EtatCalc, Mode, ModeAngle};

/// Durée d’affichage d’une erreur (secondes, horloge egui).
pub const ERREUR_DUREE_S: f64 = 3.0;

/// Clés du stockage local (eframe::Storage -> localStorage en web).
pub const CLE_HISTORIQUE: &str = "calculatrice.historique";
pub const CLE_THEME: &str = "calculatrice.theme";
pub const CLE_ANGLE: &str = "calculatrice.angle";

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- noyau ---
    pub calc: EtatCalc,

    // --- collaborateurs persistés ---
    pub historique: Historique,
    pub theme: Theme,

    // --- erreur transitoire ---
    pub erreur: String,
    pub erreur_depuis: Option<f64>,

    // --- UX ---
    pub filtre_historique: String,
}

impl AppCalc {
    /* ------------------------ Persistance ------------------------ */

    /// Relit thème, mode d’angle et historique. Une valeur illisible est ignorée
    /// (défaut), jamais fatale.
    pub fn charger(storage: &dyn eframe::Storage) -> Self {
        let mut app = Self::default();

        if let Some(t) = storage.get_string(CLE_THEME).as_deref().and_then(Theme::depuis_str) {
            app.theme = t;
        }
        if let Some(a) = storage
            .get_string(CLE_ANGLE)
            .as_deref()
            .and_then(ModeAngle::depuis_str)
        {
            app.calc.set_angle(a);
        }
        if let Some(json) = storage.get_string(CLE_HISTORIQUE) {
            match Historique::depuis_json(&json) {
                Ok(h) => app.historique = h,
                Err(e) => warn!(erreur = %e, "historique illisible, ignoré"),
            }
        }

        app
    }

    pub fn sauver(&self, storage: &mut dyn eframe::Storage) {
        storage.set_string(CLE_THEME, self.theme.as_str().to_string());
        storage.set_string(CLE_ANGLE, self.calc.angle().as_str().to_string());
        match self.historique.vers_json() {
            Ok(json) => storage.set_string(CLE_HISTORIQUE, json),
            Err(e) => warn!(erreur = %e, "historique non sérialisable"),
        }
    }

    /* ------------------------ Actions ------------------------ */

    /// Route une action vers le noyau. `maintenant` : horloge egui (secondes).
    pub fn action(&mut self, nom: &str, maintenant: f64) {
        match self.calc.traiter_action(nom) {
            Ok(Some(ev)) => {
                self.historique.ajouter(&ev, Utc::now());
                self.clear_erreur();
            }
            Ok(None) => {}
            Err(e) => self.set_erreur(e.to_string(), maintenant),
        }
    }

    /// Réinjecte un résultat de l’historique dans l’entrée.
    pub fn inserer_resultat(&mut self, v: f64) {
        self.calc.inserer_nombre(v);
    }

    pub fn basculer_angle(&mut self) {
        let a = self.calc.angle().bascule();
        self.calc.set_angle(a);
    }

    pub fn basculer_theme(&mut self) {
        self.theme = self.theme.bascule();
    }

    /* ------------------------ Erreur transitoire ------------------------ */

    pub fn set_erreur(&mut self, msg: impl Into<String>, maintenant: f64) {
        self.erreur = msg.into();
        self.erreur_depuis = Some(maintenant);
    }

    pub fn clear_erreur(&mut self) {
        self.erreur.clear();
        self.erreur_depuis = None;
    }

    /// Efface l’erreur si elle a expiré. Retourne true si une erreur reste affichée.
    pub fn expirer_erreur(&mut self, maintenant: f64) -> bool {
        match self.erreur_depuis {
            Some(t0) if maintenant - t0 >= ERREUR_DUREE_S => {
                self.clear_erreur();
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /* ------------------------ Affichage ------------------------ */

    /// Ligne principale : résultat formaté après `=`, entrée brute sinon.
    pub fn affichage(&self) -> String {
        match (self.calc.mode(), self.calc.dernier_resultat()) {
            (Mode::Resultat, Some(v)) if !self.calc.entree().is_empty() => formater_resultat(v),
            _ if self.calc.entree().is_empty() => "0".to_string(),
            _ => self.calc.entree().to_string(),
        }
    }
}
