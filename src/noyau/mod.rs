//! Noyau de calcul (f64)
//!
//! Organisation interne :
//! - jetons.rs      : tokenisation + normalisation des glyphes (× ÷ − **)
//! - valide.rs      : contrôle syntaxique (verrou final)
//! - rpn.rs         : shunting-yard + construction Expr (arité, factorielle)
//! - expr.rs        : AST fermé + évaluation
//! - fonctions.rs   : constantes, fonctions, mode d’angle, factorielle
//! - erreur.rs      : erreurs typées
//! - eval.rs        : pipeline complet
//! - format.rs      : affichage des résultats
//! - calculatrice.rs: état de saisie (résultat / saisie, mémoire, ans)

pub mod calculatrice;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod rpn;
pub mod valide;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use calculatrice::{EtatCalc, Evaluation, Mode};
pub use eval::eval_expression;
pub use fonctions::ModeAngle;
pub use format::formater_resultat;
