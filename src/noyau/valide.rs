//! Contrôle syntaxique (dernier verrou avant le parse).
//!
//! Travaille sur les jetons, pas sur la chaîne : une fois ce contrôle passé,
//! seuls des nombres, constantes/fonctions connues, opérateurs, parenthèses
//! équilibrées et virgules d’appel subsistent.

use super::erreur::ErreurEval;
use super::fonctions::{Constante, Fonction};
use super::jetons::Tok;

/// Garde-fou : longueur maximale (anti-gel).
pub const MAX_JETONS: usize = 4096;

/// Garde-fou : profondeur de parenthèses (anti-débordement de pile à l’évaluation).
pub const MAX_PROFONDEUR: usize = 64;

/// Ce qu’une parenthèse ouvrante a ouvert.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Groupe {
    Simple,
    Appel,
}

pub fn valider(tokens: &[Tok]) -> Result<(), ErreurEval> {
    if tokens.is_empty() {
        return Err(ErreurEval::invalide("Entrée vide"));
    }
    if tokens.len() > MAX_JETONS {
        return Err(ErreurEval::invalide("expression trop longue"));
    }

    let mut groupes: Vec<Groupe> = Vec::new();
    let mut prev: Option<&Tok> = None;

    for (i, tok) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1);

        match tok {
            Tok::Ident(name) => {
                if Fonction::depuis_nom(name).is_some() {
                    if next != Some(&Tok::LPar) {
                        return Err(ErreurEval::invalide(format!("'(' attendu après {name}")));
                    }
                } else if Constante::depuis_nom(name).is_none() {
                    return Err(ErreurEval::invalide(format!("identifiant inconnu : {name}")));
                }
            }

            Tok::LPar => {
                let appel = matches!(prev, Some(Tok::Ident(name)) if Fonction::depuis_nom(name).is_some());
                if !appel && next == Some(&Tok::RPar) {
                    return Err(ErreurEval::invalide("parenthèses vides"));
                }
                groupes.push(if appel { Groupe::Appel } else { Groupe::Simple });
                if groupes.len() > MAX_PROFONDEUR {
                    return Err(ErreurEval::invalide("imbrication trop profonde"));
                }
            }

            Tok::RPar => {
                if groupes.pop().is_none() {
                    return Err(ErreurEval::invalide("parenthèse fermante sans ouvrante"));
                }
            }

            Tok::Virgule => {
                if groupes.last() != Some(&Groupe::Appel) {
                    return Err(ErreurEval::invalide("virgule hors d’un appel de fonction"));
                }
                if matches!(prev, Some(Tok::LPar) | Some(Tok::Virgule)) {
                    return Err(ErreurEval::invalide("argument vide"));
                }
                if matches!(next, None | Some(Tok::RPar) | Some(Tok::Virgule)) {
                    return Err(ErreurEval::invalide("argument vide"));
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if next.is_some_and(Tok::est_operateur) {
                    return Err(ErreurEval::invalide("opérateurs consécutifs"));
                }
                if matches!(next, None | Some(Tok::RPar) | Some(Tok::Virgule)) {
                    return Err(ErreurEval::invalide("opérande manquant après un opérateur"));
                }
                // seuls + et - peuvent être préfixes
                let prefixe = matches!(prev, None | Some(Tok::LPar) | Some(Tok::Virgule));
                if prefixe && !matches!(tok, Tok::Plus | Tok::Minus) {
                    return Err(ErreurEval::invalide("opérande manquant avant un opérateur"));
                }
            }

            Tok::Num(_) => {}
        }

        // Un opérande ne peut pas être suivi directement d’un autre opérande :
        // pas de multiplication implicite dans la grammaire.
        if fin_operande(tok) && next.is_some_and(debut_operande) {
            return Err(ErreurEval::invalide("opérateur manquant"));
        }

        prev = Some(tok);
    }

    if !groupes.is_empty() {
        return Err(ErreurEval::invalide("parenthèses non fermées"));
    }

    Ok(())
}

fn fin_operande(t: &Tok) -> bool {
    match t {
        Tok::Num(_) | Tok::RPar => true,
        Tok::Ident(name) => Constante::depuis_nom(name).is_some(),
        _ => false,
    }
}

fn debut_operande(t: &Tok) -> bool {
    matches!(t, Tok::Num(_) | Tok::Ident(_) | Tok::LPar)
}
