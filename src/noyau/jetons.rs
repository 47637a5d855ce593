// src/noyau/jetons.rs
//
// Tokenisation + normalisation des glyphes d’affichage.
// L’entrée UI stocke × ÷ − pour l’affichage ; ici tout retombe sur un seul
// alphabet d’opérateurs.

use super::erreur::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Constantes + fonctions (minuscules). La validation décide si le nom est connu.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^ ou **

    LPar,
    RPar,
    Virgule,
}

impl Tok {
    pub fn est_operateur(&self) -> bool {
        matches!(
            self,
            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret
        )
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (12, 1.5, .5, 3.) + exposant (1e-7, 2.5E+3)
/// - opérateurs + - * / ^ ** et glyphes × ÷ −
/// - parenthèses ( ) et virgule (séparateur d’arguments)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
/// - π (équivaut à ident("pi"))
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Virgule),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '×' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // * ou ** (puissance)
        if c == '*' {
            if chars.get(i + 1) == Some(&'*') {
                out.push(Tok::Caret);
                i += 2;
            } else {
                out.push(Tok::Star);
                i += 1;
            }
            continue;
        }

        if c == 'π' {
            out.push(Tok::Ident("pi".to_string()));
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_lowercase()));
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let (n, suite) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(n));
            i = suite;
            continue;
        }

        return Err(ErreurEval::invalide(format!("caractère inattendu : '{c}'")));
    }

    Ok(out)
}

/// Lit un nombre à partir de `start`. Retourne (valeur, index suivant).
///
/// L’exposant n’est consommé que s’il est complet (`e`, signe optionnel, chiffre) :
/// sinon `2e` reste `2` suivi de l’identifiant `e`, ce que la validation refuse.
fn lire_nombre(chars: &[char], start: usize) -> Result<(f64, usize), ErreurEval> {
    let mut i = start;
    let mut chiffres = 0usize;

    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
        chiffres += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
            chiffres += 1;
        }
    }
    if chiffres == 0 {
        return Err(ErreurEval::invalide("nombre invalide : '.' seul"));
    }

    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    let texte: String = chars[start..i].iter().collect();
    let n = texte
        .parse::<f64>()
        .map_err(|_| ErreurEval::invalide(format!("nombre invalide : {texte}")))?;
    Ok((n, i))
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(n) => n.to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Virgule => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
