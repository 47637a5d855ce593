//! Noyau — évaluation (pipeline réel)
//!
//! tokenize (glyphes normalisés) -> contrôle syntaxique -> RPN -> Expr
//!        -> évaluation f64 (contexte : angle + ans) -> classification
//!
//! Aucun puits d’exécution générique : l’évaluation ne voit qu’un arbre
//! fermé {Num, Const, Un, Bin, Appel} construit depuis une grammaire contrôlée.

use tracing::trace;

use super::erreur::{ErreurEval, NonFini};
use super::expr::Contexte;
use super::fonctions::ModeAngle;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{from_rpn, to_rpn};
use super::valide::valider;

/// API publique : évalue une expression en double précision.
///
/// `ans` est le dernier résultat réussi (None => `ans` vaut 0).
pub fn eval_expression(
    expr_str: &str,
    angle: ModeAngle,
    ans: Option<f64>,
) -> Result<f64, ErreurEval> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurEval::invalide("Entrée vide"));
    }

    // 1) Jetons (+ normalisation × ÷ − ** -> alphabet canonique)
    let jetons = tokenize(s)?;
    trace!(jetons = %format_tokens(&jetons), "tokenisation");

    // 2) Contrôle syntaxique : verrou final, avant toute construction d’arbre
    valider(&jetons)?;

    // 3) RPN puis AST (arité + argument de factorielle contrôlés ici)
    let rpn = to_rpn(&jetons)?;
    let expr = from_rpn(&rpn)?;

    // 4) Évaluation
    let v = expr.evaluer(&Contexte { angle, ans })?;

    // 5) Classification
    classer(v)
}

/// NaN et ±inf ne sortent jamais du noyau comme valeurs.
pub fn classer(v: f64) -> Result<f64, ErreurEval> {
    if v.is_nan() {
        Err(ErreurEval::ResultatNonFini(NonFini::PasUnNombre))
    } else if v.is_infinite() {
        Err(ErreurEval::ResultatNonFini(NonFini::Infini))
    } else {
        Ok(v)
    }
}
