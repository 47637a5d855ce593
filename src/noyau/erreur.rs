//! Erreurs du noyau.
//!
//! Toutes terminales pour l’appel en cours : aucune reprise automatique,
//! l’entrée reste intacte côté état.

use std::fmt;

use thiserror::Error;

/// Nature d’un résultat non fini.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NonFini {
    PasUnNombre,
    Infini,
}

impl fmt::Display for NonFini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonFini::PasUnNombre => f.write_str("pas un nombre"),
            NonFini::Infini => f.write_str("résultat infini"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurEval {
    /// Parenthèses, caractères, identifiants ou enchaînement d’opérateurs refusés.
    #[error("expression invalide : {0}")]
    ExpressionInvalide(String),

    /// Mauvaise arité, ou argument de factorielle qui n’est pas numérique simple.
    #[error("arguments invalides pour {fonction} : {raison}")]
    ArgumentsInvalides {
        fonction: &'static str,
        raison: String,
    },

    /// Factorielle hors de [0, 170] ou non entière.
    #[error("factorielle hors domaine ({0}) : entier entre 0 et 170 attendu")]
    DomaineFactorielle(f64),

    #[error("{0}")]
    ResultatNonFini(NonFini),
}

impl ErreurEval {
    pub(crate) fn invalide(msg: impl Into<String>) -> Self {
        ErreurEval::ExpressionInvalide(msg.into())
    }
}
