// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok (déjà validée) en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - fonction connue => empilée, sortie après sa parenthèse fermante
//      avec le nombre d’arguments comptés (virgules)
//    - constante => atome
// - + / - unaires : s’ils arrivent quand on n’attend PAS d’opérateur binaire
//   (début, après '(' ou ',').
// - Précédences : + - (1) < * / (2) < unaire (3) < ^ (4, associatif à droite)
//   donc -2^2 = -(2^2) et 2^3^2 = 2^(3^2).

use super::erreur::ErreurEval;
use super::expr::{Expr, OpBin, OpUn};
use super::fonctions::{Constante, Fonction};
use super::jetons::Tok;

/// Élément de la sortie postfixée.
#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Const(Constante),
    Bin(OpBin),
    Un(OpUn),
    Appel(Fonction, usize),
}

/// Élément de la pile d’opérateurs.
#[derive(Clone, Copy, Debug)]
enum Pile {
    Bin(OpBin),
    Un(OpUn),
    LPar,
    Appel(Fonction),
}

fn precedence_bin(op: OpBin) -> u8 {
    match op {
        OpBin::Add | OpBin::Sub => 1,
        OpBin::Mul | OpBin::Div => 2,
        OpBin::Pow => 4,
    }
}

const PRECEDENCE_UNAIRE: u8 = 3;

fn op_bin(t: &Tok) -> Option<OpBin> {
    match t {
        Tok::Plus => Some(OpBin::Add),
        Tok::Minus => Some(OpBin::Sub),
        Tok::Star => Some(OpBin::Mul),
        Tok::Slash => Some(OpBin::Div),
        Tok::Caret => Some(OpBin::Pow),
        _ => None,
    }
}

fn vers_sortie(p: Pile) -> Option<Rpn> {
    match p {
        Pile::Bin(op) => Some(Rpn::Bin(op)),
        Pile::Un(op) => Some(Rpn::Un(op)),
        Pile::LPar | Pile::Appel(_) => None,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("pow"), LPar, Num(2), Virgule, Num(3), RPar, Star, Num(4)]
///   rpn:    [Num(2), Num(3), Appel(Pow, 2), Num(4), Bin(Mul)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurEval> {
    let mut out: Vec<Rpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Pile> = Vec::new();
    // nombre d’arguments de chaque appel ouvert
    let mut arguments: Vec<usize> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter les signes unaires.
    let mut prev_was_value = false;

    for (i, tok) in tokens.iter().enumerate() {
        match tok {
            Tok::Num(n) => {
                out.push(Rpn::Num(*n));
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if let Some(f) = Fonction::depuis_nom(name) {
                    ops.push(Pile::Appel(f));
                    prev_was_value = false;
                } else if let Some(c) = Constante::depuis_nom(name) {
                    out.push(Rpn::Const(c));
                    prev_was_value = true;
                } else {
                    return Err(ErreurEval::invalide(format!("identifiant inconnu : {name}")));
                }
            }

            Tok::LPar => {
                if matches!(ops.last(), Some(Pile::Appel(_))) {
                    let vide = tokens.get(i + 1) == Some(&Tok::RPar);
                    arguments.push(if vide { 0 } else { 1 });
                }
                ops.push(Pile::LPar);
                prev_was_value = false;
            }

            Tok::Virgule => {
                depile_jusqu_a_parenthese(&mut ops, &mut out);
                match arguments.last_mut() {
                    Some(n) => *n += 1,
                    None => return Err(ErreurEval::invalide("virgule hors d’un appel de fonction")),
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                depile_jusqu_a_parenthese(&mut ops, &mut out);
                if !matches!(ops.pop(), Some(Pile::LPar)) {
                    return Err(ErreurEval::invalide("parenthèse fermante sans ouvrante"));
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Pile::Appel(f)) = ops.last().copied() {
                    ops.pop();
                    let n = arguments.pop().unwrap_or(0);
                    out.push(Rpn::Appel(f, n));
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                let op = if matches!(tok, Tok::Minus) {
                    OpUn::Moins
                } else {
                    OpUn::Plus
                };
                // préfixe : rien à dépiler
                ops.push(Pile::Un(op));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let op = op_bin(tok).ok_or_else(|| ErreurEval::invalide("opérateur inattendu"))?;
                let p_tok = precedence_bin(op);
                let droite = matches!(op, OpBin::Pow);

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou une fonction
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last().copied() {
                    let p_top = match top {
                        Pile::Bin(o) => precedence_bin(o),
                        Pile::Un(_) => PRECEDENCE_UNAIRE,
                        Pile::LPar | Pile::Appel(_) => break,
                    };

                    let doit_pop = if droite { p_top > p_tok } else { p_top >= p_tok };
                    if !doit_pop {
                        break;
                    }
                    ops.pop();
                    out.extend(vers_sortie(top));
                }

                ops.push(Pile::Bin(op));
                prev_was_value = false;
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match op {
            Pile::LPar | Pile::Appel(_) => return Err(ErreurEval::invalide("parenthèses non fermées")),
            _ => out.extend(vers_sortie(op)),
        }
    }

    Ok(out)
}

fn depile_jusqu_a_parenthese(ops: &mut Vec<Pile>, out: &mut Vec<Rpn>) {
    while let Some(top) = ops.last().copied() {
        if matches!(top, Pile::LPar) {
            break;
        }
        ops.pop();
        out.extend(vers_sortie(top));
    }
}

/// Garde-fou : hauteur maximale de l’arbre. Une chaîne plate `1-1-…-1`
/// donne un arbre aussi haut que long ; l’évaluation est récursive.
pub const MAX_HAUTEUR: usize = 1024;

/// Construit une Expr à partir d’une RPN.
///
/// Contrôles d’appel :
/// - arité exacte (pow : 2, autres : 1)
/// - factorial : argument numérique simple uniquement (pas d’appel imbriqué)
///
/// Chaque noeud empilé porte sa hauteur, bornée par `MAX_HAUTEUR`.
pub fn from_rpn(rpn: &[Rpn]) -> Result<Expr, ErreurEval> {
    let mut st: Vec<(Expr, usize)> = Vec::new();

    for item in rpn {
        match item {
            Rpn::Num(n) => st.push((Expr::Num(*n), 1)),
            Rpn::Const(c) => st.push((Expr::Const(*c), 1)),

            Rpn::Un(op) => {
                let (x, h) = st.pop().ok_or_else(|| ErreurEval::invalide("opérande manquant"))?;
                st.push((Expr::Un(*op, Box::new(x)), hauteur(h)?));
            }

            Rpn::Bin(op) => {
                let (b, hb) = st.pop().ok_or_else(|| ErreurEval::invalide("opérande manquant"))?;
                let (a, ha) = st.pop().ok_or_else(|| ErreurEval::invalide("opérande manquant"))?;
                st.push((Expr::Bin(*op, Box::new(a), Box::new(b)), hauteur(ha.max(hb))?));
            }

            Rpn::Appel(f, n) => {
                if *n != f.arite() {
                    return Err(ErreurEval::ArgumentsInvalides {
                        fonction: f.nom(),
                        raison: format!("{} argument(s) attendu(s), {n} reçu(s)", f.arite()),
                    });
                }
                if st.len() < *n {
                    return Err(ErreurEval::invalide("expression invalide"));
                }
                let (args, hauteurs): (Vec<Expr>, Vec<usize>) =
                    st.split_off(st.len() - n).into_iter().unzip();

                if *f == Fonction::Factorielle && !args.iter().all(Expr::est_numerique_simple) {
                    return Err(ErreurEval::ArgumentsInvalides {
                        fonction: f.nom(),
                        raison: "argument numérique simple attendu".into(),
                    });
                }

                let h = hauteur(hauteurs.into_iter().max().unwrap_or(0))?;
                st.push((Expr::Appel(*f, args), h));
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(ErreurEval::invalide("expression invalide")),
    }
}

/// Hauteur d’un noeud au-dessus d’enfants de hauteur `h`.
fn hauteur(h: usize) -> Result<usize, ErreurEval> {
    if h >= MAX_HAUTEUR {
        return Err(ErreurEval::invalide(format!(
            "expression trop profonde (max {MAX_HAUTEUR} niveaux)"
        )));
    }
    Ok(h + 1)
}
