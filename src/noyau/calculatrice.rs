//! État de saisie de la calculatrice (machine à deux modes).
//!
//! - `Mode::Resultat` : l’entrée montre un résultat terminé ; le prochain chiffre
//!   démarre une nouvelle expression.
//! - `Mode::Saisie` : l’entrée est en cours d’édition.
//!
//! Contrats :
//! - Seule l’évaluation peut échouer ; l’erreur remonte telle quelle et l’entrée
//!   reste intacte.
//! - Une action inconnue est ignorée (journalisée), jamais une erreur.
//! - Les opérateurs sont stockés en glyphes d’affichage (+ − × ÷ ^).

use tracing::debug;

use super::erreur::ErreurEval;
use super::eval::eval_expression;
use super::fonctions::{Constante, Fonction, ModeAngle};
use super::format::nombre_brut;

/// Résultat d’un `equals` réussi.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub expression: String,
    pub resultat: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Resultat,
    Saisie,
}

/// Vocabulaire d’actions normalisé (produit par les boutons / le clavier).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Chiffre(char),
    Operateur(char),
    ParOuvrante,
    ParFermante,
    Virgule,
    Egal,
    Clear,
    ClearEntry,
    Backspace,
    Negate,
    MemoireAjout,
    MemoireRetrait,
    MemoireRappel,
    MemoireEfface,
    Ans,
    Fonction(Fonction),
    Constante(Constante),
}

impl Action {
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        let a = match nom {
            "+" => Action::Operateur('+'),
            "-" | "−" => Action::Operateur('−'),
            "*" | "×" => Action::Operateur('×'),
            "/" | "÷" => Action::Operateur('÷'),
            "^" => Action::Operateur('^'),
            "(" => Action::ParOuvrante,
            ")" => Action::ParFermante,
            "," => Action::Virgule,
            "equals" | "=" => Action::Egal,
            "clear" => Action::Clear,
            "clear-entry" => Action::ClearEntry,
            "backspace" => Action::Backspace,
            "negate" => Action::Negate,
            "memory-add" => Action::MemoireAjout,
            "memory-subtract" => Action::MemoireRetrait,
            "memory-recall" => Action::MemoireRappel,
            "memory-clear" => Action::MemoireEfface,
            "ans" => Action::Ans,
            _ => {
                let mut chars = nom.chars();
                return match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() || c == '.' => Some(Action::Chiffre(c)),
                    _ => Fonction::depuis_nom(nom)
                        .map(Action::Fonction)
                        .or_else(|| Constante::depuis_nom(nom).map(Action::Constante)),
                };
            }
        };
        Some(a)
    }
}

fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '−' | '*' | '×' | '/' | '÷' | '^')
}

/// Valeur tapée comme opérande : un négatif est parenthésé, pour que
/// `(-6)^2` ne devienne pas `-6^2`.
fn operande(v: f64) -> String {
    let brut = nombre_brut(v);
    if v < 0.0 {
        format!("({brut})")
    } else {
        brut
    }
}

fn est_ouvrant_ou_operateur(c: char) -> bool {
    c == '(' || c == ',' || est_operateur(c)
}

#[derive(Clone, Debug)]
pub struct EtatCalc {
    entree: String,
    mode: Mode,
    dernier: Option<f64>,
    memoire: f64,
    angle: ModeAngle,
}

impl Default for EtatCalc {
    fn default() -> Self {
        Self::new(ModeAngle::default())
    }
}

impl EtatCalc {
    pub fn new(angle: ModeAngle) -> Self {
        Self {
            entree: String::new(),
            mode: Mode::Resultat,
            dernier: None,
            memoire: 0.0,
            angle,
        }
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn entree(&self) -> &str {
        &self.entree
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn dernier_resultat(&self) -> Option<f64> {
        self.dernier
    }

    pub fn memoire(&self) -> f64 {
        self.memoire
    }

    pub fn angle(&self) -> ModeAngle {
        self.angle
    }

    pub fn set_angle(&mut self, angle: ModeAngle) {
        self.angle = angle;
    }

    /* ------------------------ Actions ------------------------ */

    /// Point d’entrée unique : nom d’action -> transition.
    ///
    /// Retourne `Some(Evaluation)` uniquement pour un `equals` réussi.
    pub fn traiter_action(&mut self, nom: &str) -> Result<Option<Evaluation>, ErreurEval> {
        match Action::depuis_nom(nom) {
            Some(a) => self.appliquer(a),
            None => {
                debug!(action = nom, "action inconnue ignorée");
                Ok(None)
            }
        }
    }

    pub fn appliquer(&mut self, action: Action) -> Result<Option<Evaluation>, ErreurEval> {
        match action {
            Action::Chiffre(c) => {
                self.demarrer_si_resultat();
                self.entree.push(c);
            }

            Action::Operateur(op) => {
                if self.mode == Mode::Resultat {
                    self.entree = self.dernier.map(operande).unwrap_or_default();
                    self.mode = Mode::Saisie;
                }
                // un opérateur tapé juste après un autre le remplace
                if self.entree.chars().last().is_some_and(est_operateur) {
                    self.entree.pop();
                }
                self.entree.push(op);
            }

            Action::ParOuvrante => {
                self.preparer_mot();
                self.entree.push('(');
            }

            Action::ParFermante | Action::Virgule => {
                if self.mode == Mode::Saisie {
                    self.entree
                        .push(if action == Action::Virgule { ',' } else { ')' });
                }
            }

            Action::Egal => return self.evaluer().map(Some),

            Action::Clear => self.clear(),

            Action::ClearEntry => match self.mode {
                Mode::Resultat => self.clear(),
                Mode::Saisie => self.entree.clear(),
            },

            Action::Backspace => {
                if self.mode == Mode::Saisie {
                    self.entree.pop();
                }
            }

            Action::Negate => self.negate(),

            Action::MemoireAjout => self.memoire += self.dernier.unwrap_or(0.0),
            Action::MemoireRetrait => self.memoire -= self.dernier.unwrap_or(0.0),
            Action::MemoireRappel => self.inserer_nombre(self.memoire),
            Action::MemoireEfface => self.memoire = 0.0,

            Action::Ans => {
                if let Some(v) = self.dernier {
                    self.inserer_nombre(v);
                }
            }

            Action::Fonction(f) => {
                self.preparer_mot();
                self.entree.push_str(f.nom());
                self.entree.push('(');
            }

            Action::Constante(c) => {
                self.preparer_mot();
                self.entree.push_str(c.nom());
            }
        }
        Ok(None)
    }

    /// Insère une valeur comme si elle avait été tapée (négatif entre parenthèses).
    pub fn inserer_nombre(&mut self, v: f64) {
        self.demarrer_si_resultat();
        self.entree.push_str(&operande(v));
    }

    fn evaluer(&mut self) -> Result<Evaluation, ErreurEval> {
        let v = eval_expression(&self.entree, self.angle, self.dernier)?;
        let expression = std::mem::replace(&mut self.entree, nombre_brut(v));
        self.dernier = Some(v);
        self.mode = Mode::Resultat;
        debug!(%expression, resultat = v, "évaluation");
        Ok(Evaluation {
            expression,
            resultat: v,
        })
    }

    fn clear(&mut self) {
        self.entree.clear();
        self.dernier = None;
        self.mode = Mode::Resultat;
    }

    fn negate(&mut self) {
        if !self.entree.is_empty() {
            match self.entree.strip_prefix(&['-', '−'][..]) {
                Some(reste) => self.entree = reste.to_string(),
                None => self.entree.insert(0, '-'),
            }
            self.mode = Mode::Saisie;
        } else if let Some(v) = self.dernier {
            self.entree = format!("-({})", nombre_brut(v));
            self.mode = Mode::Saisie;
        }
    }

    /// Chiffre après un résultat : nouvelle expression.
    fn demarrer_si_resultat(&mut self) {
        if self.mode == Mode::Resultat {
            self.entree.clear();
            self.mode = Mode::Saisie;
        }
    }

    /// Fonction / constante / '(' : nouvelle expression après un résultat,
    /// sinon multiplication implicite si l’entrée se termine par un opérande.
    fn preparer_mot(&mut self) {
        self.demarrer_si_resultat();
        if let Some(c) = self.entree.chars().last() {
            if !est_ouvrant_ou_operateur(c) {
                self.entree.push('×');
            }
        }
    }
}
