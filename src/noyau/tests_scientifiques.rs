//! Tests scientifiques (campagne) : propriétés attendues + limites contrôlées.
//!
//! But : vérifier le contrat du noyau de bout en bout (chaîne -> f64 ou erreur typée),
//! sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)

use std::f64::consts::{E, PI};
use std::time::{Duration, Instant};

use super::erreur::{ErreurEval, NonFini};
use super::eval_expression;
use super::fonctions::ModeAngle;
use super::rpn::MAX_HAUTEUR;
use super::valide::{MAX_JETONS, MAX_PROFONDEUR};
use super::{EtatCalc, Mode};

const RAD: ModeAngle = ModeAngle::Radians;
const DEG: ModeAngle = ModeAngle::Degres;

fn eval_ok(expr: &str, angle: ModeAngle) -> f64 {
    eval_expression(expr, angle, None).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, angle: ModeAngle, attendu: f64) {
    let v = eval_ok(expr, angle);
    assert!(
        (v - attendu).abs() < 1e-9,
        "expr={expr:?} attendu={attendu} obtenu={v}"
    );
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Arithmétique ------------------------ */

#[test]
fn sci_arithmetique_glyphes() {
    assert_eq!(eval_ok("2+3", RAD), 5.0);
    assert_eq!(eval_ok("4×5", RAD), 20.0);
    assert_eq!(eval_ok("15÷3", RAD), 5.0);
    assert_eq!(eval_ok("2^3", RAD), 8.0);
    assert_eq!(eval_ok("1.5×4−2÷8", RAD), 5.75);
}

/* ------------------------ Factorielle ------------------------ */

#[test]
fn sci_factorielle_domaine() {
    assert_eq!(eval_ok("factorial(5)", RAD), 120.0);
    assert_eq!(eval_ok("factorial(0)", RAD), 1.0);
    for expr in ["factorial(-1)", "factorial(2.5)", "factorial(171)"] {
        assert!(
            matches!(
                eval_expression(expr, RAD, None),
                Err(ErreurEval::DomaineFactorielle(_))
            ),
            "expr={expr:?}"
        );
    }
    // 170! tient encore dans un f64
    assert!(eval_ok("factorial(170)", RAD) > 7.2e306);
}

/* ------------------------ Trig + constantes ------------------------ */

#[test]
fn sci_trig_modes() {
    assert_proche("sin(0)", RAD, 0.0);
    assert_proche("cos(0)", RAD, 1.0);
    assert_proche("sin(90)", DEG, 1.0);
    assert_proche("sin(pi/2)", RAD, 1.0);
    assert_proche("tan(45)", DEG, 1.0);
    assert_proche("acos(0)", DEG, 90.0);
    assert_proche("asin(0.5)", RAD, PI / 6.0);
}

#[test]
fn sci_constantes() {
    assert_proche("pi", RAD, PI);
    assert_proche("e", RAD, E);
    assert_proche("2×pi", RAD, 2.0 * PI);
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn sci_erreurs_classees() {
    assert_eq!(
        eval_expression("1/0", RAD, None),
        Err(ErreurEval::ResultatNonFini(NonFini::Infini))
    );
    assert!(matches!(
        eval_expression("2++3", RAD, None),
        Err(ErreurEval::ExpressionInvalide(_))
    ));
    assert!(matches!(
        eval_expression("2+3)", RAD, None),
        Err(ErreurEval::ExpressionInvalide(_))
    ));
}

/* ------------------------ Idempotence + ans ------------------------ */

#[test]
fn sci_idempotence() {
    for expr in ["sin(1)+cos(2)", "sqrt(2)^2", "pow(3, 0.5)×e", "ans+1"] {
        let a = eval_expression(expr, RAD, Some(4.0));
        let b = eval_expression(expr, RAD, Some(4.0));
        assert_eq!(a, b, "expr={expr:?}");
    }
}

#[test]
fn sci_ans_change_entre_les_appels() {
    let mut calc = EtatCalc::default();
    for a in ["2", "equals", "ans", "×", "3", "equals"] {
        calc.traiter_action(a).unwrap();
    }
    assert_eq!(calc.dernier_resultat(), Some(6.0));
    calc.traiter_action("ans").unwrap();
    calc.traiter_action("+").unwrap();
    calc.traiter_action("ans").unwrap();
    // ans lu une seule fois par évaluation : 6 + 6
    assert_eq!(calc.traiter_action("equals").unwrap().map(|e| e.resultat), Some(12.0));
}

/* ------------------------ Machine à états ------------------------ */

#[test]
fn sci_chiffre_apres_egal_nouvelle_expression() {
    let mut calc = EtatCalc::default();
    for a in ["1", "+", "1", "equals"] {
        calc.traiter_action(a).unwrap();
    }
    assert_eq!(calc.mode(), Mode::Resultat);
    for d in ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "."] {
        let mut c = calc.clone();
        c.traiter_action(d).unwrap();
        assert_eq!(c.entree(), d, "chiffre {d:?} doit démarrer une expression neuve");
        assert_eq!(c.mode(), Mode::Saisie);
    }
}

#[test]
fn sci_negate_involution() {
    let mut calc = EtatCalc::default();
    calc.traiter_action("5").unwrap();
    calc.traiter_action("negate").unwrap();
    calc.traiter_action("negate").unwrap();
    assert_eq!(calc.entree(), "5");
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // arbre gauche profond (~1000 niveaux) : doit rester sous la garde MAX_JETONS
    let expr = vec!["1"; 1000].join("+");
    assert!(expr.len() < 2 * MAX_JETONS);
    budget(t0, max);

    assert_eq!(eval_ok(&expr, RAD), 1000.0);
}

#[test]
fn sci_stress_chaine_plate_au_plafond_de_jetons() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 2048 termes = 4095 jetons : accepté par le contrôle syntaxique,
    // refusé par la garde de hauteur, sans débordement de pile
    let expr = vec!["1"; 2048].join("-");
    assert!(expr.len() < MAX_JETONS);
    assert!(matches!(
        eval_expression(&expr, RAD, None),
        Err(ErreurEval::ExpressionInvalide(_))
    ));

    let juste = vec!["1"; MAX_HAUTEUR].join("-");
    assert_eq!(eval_ok(&juste, RAD), 2.0 - MAX_HAUTEUR as f64);
    budget(t0, max);
}

#[test]
fn sci_stress_imbrication_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let ok = format!("{}2{}", "(".repeat(MAX_PROFONDEUR), ")".repeat(MAX_PROFONDEUR));
    assert_eq!(eval_ok(&ok, RAD), 2.0);

    // bien au-delà : refusé avant toute récursion
    let trop = format!("{}2{}", "(".repeat(100_000), ")".repeat(100_000));
    assert!(matches!(
        eval_expression(&trop, RAD, None),
        Err(ErreurEval::ExpressionInvalide(_))
    ));
    budget(t0, max);
}
