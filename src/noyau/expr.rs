// src/noyau/expr.rs
//
// AST numérique (f64), ensemble de noeuds fermé :
// - Num   : littéral
// - Const : pi / e / phi / ans (valeur lue à l’évaluation)
// - Un    : + ou - préfixe
// - Bin   : + - * / ^
// - Appel : fonction de la table fermée
//
// Évaluation par descente d’arbre, sans état caché : seul le Contexte
// (mode d’angle + dernier résultat) est lu.

use super::erreur::ErreurEval;
use super::fonctions::{Constante, Fonction, ModeAngle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBin {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUn {
    Plus,
    Moins,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Const(Constante),
    Un(OpUn, Box<Expr>),
    Bin(OpBin, Box<Expr>, Box<Expr>),
    Appel(Fonction, Vec<Expr>),
}

/// Ce que l’évaluation a le droit de lire.
#[derive(Clone, Copy, Debug, Default)]
pub struct Contexte {
    pub angle: ModeAngle,
    pub ans: Option<f64>,
}

impl Expr {
    /// Sous-expression numérique simple : nombres, constantes, opérateurs,
    /// parenthèses. Aucun appel de fonction imbriqué.
    pub fn est_numerique_simple(&self) -> bool {
        match self {
            Expr::Num(_) | Expr::Const(_) => true,
            Expr::Un(_, x) => x.est_numerique_simple(),
            Expr::Bin(_, a, b) => a.est_numerique_simple() && b.est_numerique_simple(),
            Expr::Appel(..) => false,
        }
    }

    pub fn evaluer(&self, ctx: &Contexte) -> Result<f64, ErreurEval> {
        match self {
            Expr::Num(n) => Ok(*n),
            Expr::Const(c) => Ok(c.valeur(ctx.ans)),

            Expr::Un(op, x) => {
                let v = x.evaluer(ctx)?;
                Ok(match op {
                    OpUn::Plus => v,
                    OpUn::Moins => -v,
                })
            }

            // IEEE : 1/0 donne inf, 0/0 NaN ; la classification finale s’en charge.
            Expr::Bin(op, a, b) => {
                let x = a.evaluer(ctx)?;
                let y = b.evaluer(ctx)?;
                Ok(match op {
                    OpBin::Add => x + y,
                    OpBin::Sub => x - y,
                    OpBin::Mul => x * y,
                    OpBin::Div => x / y,
                    OpBin::Pow => x.powf(y),
                })
            }

            Expr::Appel(f, args) => {
                let valeurs = args
                    .iter()
                    .map(|a| a.evaluer(ctx))
                    .collect::<Result<Vec<f64>, _>>()?;
                f.appliquer(&valeurs, ctx.angle)
            }
        }
    }
}
