// src/noyau/fonctions.rs
//
// Tables fermées : constantes + fonctions + mode d’angle.
// - Le mode d’angle est lu à l’évaluation (jamais figé dans la table).
// - factorielle bornée à 170 (171! déborde en +inf sur f64).

use std::f64::consts::{E, PI};

use num_traits::ToPrimitive;

use super::erreur::ErreurEval;

/// Dernier entier dont la factorielle tient dans un f64.
pub const FACTORIELLE_MAX: u32 = 170;

/// Nombre d’or (1 + √5) / 2.
const PHI: f64 = 1.618_033_988_749_895;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Radians,
    Degres,
}

impl ModeAngle {
    pub fn as_str(self) -> &'static str {
        match self {
            ModeAngle::Radians => "rad",
            ModeAngle::Degres => "deg",
        }
    }

    pub fn depuis_str(s: &str) -> Option<Self> {
        match s {
            "rad" => Some(ModeAngle::Radians),
            "deg" => Some(ModeAngle::Degres),
            _ => None,
        }
    }

    pub fn bascule(self) -> Self {
        match self {
            ModeAngle::Radians => ModeAngle::Degres,
            ModeAngle::Degres => ModeAngle::Radians,
        }
    }

    /// Argument utilisateur -> radians (sin/cos/tan).
    fn entree(self, x: f64) -> f64 {
        match self {
            ModeAngle::Radians => x,
            ModeAngle::Degres => x * PI / 180.0,
        }
    }

    /// Radians -> unité utilisateur (asin/acos/atan).
    fn sortie(self, x: f64) -> f64 {
        match self {
            ModeAngle::Radians => x,
            ModeAngle::Degres => x * 180.0 / PI,
        }
    }
}

/* ------------------------ Constantes ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
    Phi,
    /// Dernier résultat (0 si aucun).
    Ans,
}

impl Constante {
    pub const TOUTES: [Constante; 4] = [Constante::Pi, Constante::E, Constante::Phi, Constante::Ans];

    pub fn depuis_nom(nom: &str) -> Option<Self> {
        Self::TOUTES.into_iter().find(|c| c.nom() == nom)
    }

    pub fn nom(self) -> &'static str {
        match self {
            Constante::Pi => "pi",
            Constante::E => "e",
            Constante::Phi => "phi",
            Constante::Ans => "ans",
        }
    }

    pub fn valeur(self, ans: Option<f64>) -> f64 {
        match self {
            Constante::Pi => PI,
            Constante::E => E,
            Constante::Phi => PHI,
            Constante::Ans => ans.unwrap_or(0.0),
        }
    }
}

/* ------------------------ Fonctions ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Log10,
    Log2,
    Sqrt,
    Cbrt,
    Pow,
    Exp,
    Abs,
    Ceil,
    Floor,
    Round,
    Factorielle,
    Reciproque,
    Carre,
    Cube,
    Pourcent,
}

impl Fonction {
    pub const TOUTES: [Fonction; 22] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Asin,
        Fonction::Acos,
        Fonction::Atan,
        Fonction::Log,
        Fonction::Log10,
        Fonction::Log2,
        Fonction::Sqrt,
        Fonction::Cbrt,
        Fonction::Pow,
        Fonction::Exp,
        Fonction::Abs,
        Fonction::Ceil,
        Fonction::Floor,
        Fonction::Round,
        Fonction::Factorielle,
        Fonction::Reciproque,
        Fonction::Carre,
        Fonction::Cube,
        Fonction::Pourcent,
    ];

    pub fn depuis_nom(nom: &str) -> Option<Self> {
        Self::TOUTES.into_iter().find(|f| f.nom() == nom)
    }

    /// Nom tel qu’il apparaît dans l’expression.
    pub fn nom(self) -> &'static str {
        use Fonction::*;
        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Log => "log",
            Log10 => "log10",
            Log2 => "log2",
            Sqrt => "sqrt",
            Cbrt => "cbrt",
            Pow => "pow",
            Exp => "exp",
            Abs => "abs",
            Ceil => "ceil",
            Floor => "floor",
            Round => "round",
            Factorielle => "factorial",
            Reciproque => "reciprocal",
            Carre => "square",
            Cube => "cube",
            Pourcent => "percent",
        }
    }

    pub fn arite(self) -> usize {
        match self {
            Fonction::Pow => 2,
            _ => 1,
        }
    }

    /// Applique la fonction à des arguments déjà évalués.
    pub fn appliquer(self, args: &[f64], angle: ModeAngle) -> Result<f64, ErreurEval> {
        use Fonction::*;

        if args.len() != self.arite() {
            return Err(ErreurEval::ArgumentsInvalides {
                fonction: self.nom(),
                raison: format!(
                    "{} argument(s) attendu(s), {} reçu(s)",
                    self.arite(),
                    args.len()
                ),
            });
        }
        let x = args[0];

        let v = match self {
            Sin => angle.entree(x).sin(),
            Cos => angle.entree(x).cos(),
            Tan => angle.entree(x).tan(),
            Asin => angle.sortie(x.asin()),
            Acos => angle.sortie(x.acos()),
            Atan => angle.sortie(x.atan()),
            Log => x.ln(),
            Log10 => x.log10(),
            Log2 => x.log2(),
            Sqrt => x.sqrt(),
            Cbrt => x.cbrt(),
            Pow => x.powf(args[1]),
            Exp => x.exp(),
            Abs => x.abs(),
            Ceil => x.ceil(),
            Floor => x.floor(),
            Round => arrondi_vers_haut(x),
            Factorielle => factorielle(x)?,
            Reciproque => 1.0 / x,
            Carre => x * x,
            Cube => x * x * x,
            Pourcent => x / 100.0,
        };
        Ok(v)
    }
}

/// Arrondi à l’entier le plus proche, demi vers +∞ (2.5 -> 3, -2.5 -> -2).
fn arrondi_vers_haut(x: f64) -> f64 {
    let plancher = x.floor();
    if x - plancher >= 0.5 {
        plancher + 1.0
    } else {
        plancher
    }
}

/// n! pour n entier dans [0, 170].
pub fn factorielle(n: f64) -> Result<f64, ErreurEval> {
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(ErreurEval::DomaineFactorielle(n));
    }
    let k = n
        .to_u32()
        .filter(|k| *k <= FACTORIELLE_MAX)
        .ok_or(ErreurEval::DomaineFactorielle(n))?;

    Ok((2..=k).fold(1.0, |acc, i| acc * f64::from(i)))
}
