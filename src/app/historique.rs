//! src/app/historique.rs
//!
//! Historique des évaluations réussies.
//!
//! Contrats :
//! - plus récent d’abord, au plus `HISTORIQUE_MAX` entrées
//! - unicité par (expression, résultat) : une ré-évaluation remonte l’entrée en tête
//! - format persistant : JSON `[{id, expression, result, timestamp}]`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::noyau::{formater_resultat, Evaluation};

/// Garde-fou : taille maximale conservée.
pub const HISTORIQUE_MAX: usize = 50;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    pub id: u64,
    pub expression: String,
    pub result: f64,
    pub timestamp: DateTime<Utc>,
}

impl EntreeHistorique {
    fn meme_calcul(&self, expression: &str, result: f64) -> bool {
        self.expression == expression && self.result == result
    }
}

#[derive(Clone, Debug, Default)]
pub struct Historique {
    entrees: Vec<EntreeHistorique>,
    prochain_id: u64,
}

impl Historique {
    pub fn ajouter(&mut self, ev: &Evaluation, quand: DateTime<Utc>) {
        self.entrees
            .retain(|e| !e.meme_calcul(&ev.expression, ev.resultat));

        self.entrees.insert(
            0,
            EntreeHistorique {
                id: self.prochain_id,
                expression: ev.expression.clone(),
                result: ev.resultat,
                timestamp: quand,
            },
        );
        self.prochain_id = self.prochain_id.saturating_add(1);
        self.entrees.truncate(HISTORIQUE_MAX);
    }

    pub fn entrees(&self) -> &[EntreeHistorique] {
        &self.entrees
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    /// Filtre insensible à la casse sur l’expression ou le résultat affiché.
    pub fn rechercher<'a>(&'a self, filtre: &str) -> impl Iterator<Item = &'a EntreeHistorique> {
        let filtre = filtre.trim().to_lowercase();
        self.entrees.iter().filter(move |e| {
            filtre.is_empty()
                || e.expression.to_lowercase().contains(&filtre)
                || formater_resultat(e.result).contains(&filtre)
        })
    }

    pub fn effacer(&mut self) {
        self.entrees.clear();
    }

    pub fn vers_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entrees)
    }

    /// Relit un historique persistant ; unicité et plafond ré-appliqués
    /// (le stockage local peut avoir été modifié à la main).
    pub fn depuis_json(json: &str) -> Result<Self, serde_json::Error> {
        let brutes: Vec<EntreeHistorique> = serde_json::from_str(json)?;

        let mut entrees: Vec<EntreeHistorique> = Vec::with_capacity(brutes.len().min(HISTORIQUE_MAX));
        for e in brutes {
            if entrees.len() == HISTORIQUE_MAX {
                break;
            }
            if !entrees.iter().any(|x| x.meme_calcul(&e.expression, e.result)) {
                entrees.push(e);
            }
        }

        let prochain_id = entrees.iter().map(|e| e.id.saturating_add(1)).max().unwrap_or(0);
        Ok(Self {
            entrees,
            prochain_id,
        })
    }
}
