//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : jamais de panique, jamais de NaN/inf en sortie Ok

use std::time::{Duration, Instant};

use super::erreur::ErreurEval;
use super::eval_expression;
use super::fonctions::{Fonction, ModeAngle};
use super::EtatCalc;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let a = rng.pick(10);
    if rng.coin() {
        format!("{a}.{}", rng.pick(100))
    } else {
        format!("{a}")
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "pi".to_string(),
        4 => "e".to_string(),
        _ => "ans".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let op = ["+", "−", "×", "÷", "^"][rng.pick(5) as usize];
    match rng.pick(5) {
        0 => gen_atom(rng),
        1 | 2 => format!(
            "({}{op}{})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        3 => {
            let f = Fonction::TOUTES[rng.pick(Fonction::TOUTES.len() as u32) as usize];
            if f.arite() == 2 {
                format!(
                    "{}({}, {})",
                    f.nom(),
                    gen_expr(rng, depth - 1),
                    gen_expr(rng, depth - 1)
                )
            } else {
                format!("{}({})", f.nom(), gen_expr(rng, depth - 1))
            }
        }
        _ => format!("(-({}))", gen_expr(rng, depth - 1)),
    }
}

/// Bruit : jetons valides assemblés au hasard (souvent syntaxiquement faux).
fn gen_bruit(rng: &mut Rng) -> String {
    const MORCEAUX: [&str; 16] = [
        "1", "2.5", "(", ")", "+", "-", "×", "÷", "^", "**", ",", "sin", "factorial", "pi", "e",
        "x",
    ];
    let n = 1 + rng.pick(12);
    (0..n)
        .map(|_| MORCEAUX[rng.pick(MORCEAUX.len() as u32) as usize])
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_resultats_finis() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let angle = if rng.coin() {
            ModeAngle::Radians
        } else {
            ModeAngle::Degres
        };

        let a = eval_expression(&expr, angle, Some(1.5));
        let b = eval_expression(&expr, angle, Some(1.5));
        // via Debug : DomaineFactorielle(NaN) n’est pas égal à lui-même
        assert_eq!(format!("{a:?}"), format!("{b:?}"), "non déterministe: expr={expr:?}");

        match a {
            Ok(v) => {
                assert!(v.is_finite(), "Ok non fini: expr={expr:?} v={v}");
                seen_ok += 1;
            }
            Err(e) => {
                // expressions bien formées : jamais d’erreur de syntaxe
                assert!(
                    !matches!(e, ErreurEval::ExpressionInvalide(_)),
                    "erreur de syntaxe inattendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..500 {
        budget(t0, max);
        let expr = gen_bruit(&mut rng);
        if let Ok(v) = eval_expression(&expr, ModeAngle::Radians, None) {
            assert!(v.is_finite(), "expr={expr:?} v={v}");
        }
    }
}

#[test]
fn fuzz_safe_clavier_aleatoire() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    const TOUCHES: [&str; 24] = [
        "1", "7", ".", "+", "-", "×", "÷", "^", "(", ")", ",", "equals", "clear", "clear-entry",
        "backspace", "negate", "memory-add", "memory-recall", "ans", "sin", "pow", "pi",
        "factorial", "memory-subtract",
    ];

    let mut rng = Rng::new(0x5EED_u64);
    let mut calc = EtatCalc::default();

    for _ in 0..2000 {
        budget(t0, max);
        let touche = TOUCHES[rng.pick(TOUCHES.len() as u32) as usize];
        let avant = calc.entree().to_string();

        match calc.traiter_action(touche) {
            Ok(Some(ev)) => assert!(ev.resultat.is_finite()),
            Ok(None) => {}
            Err(_) => assert_eq!(calc.entree(), avant, "l’échec ne doit pas toucher l’entrée"),
        }
    }
}
