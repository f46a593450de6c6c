use mathhammer::data::{AttackKind, AttackProfile, TargetConfig, UnitEntry};
use mathhammer::engine::{
    effective_hit_threshold, expected_damage_all, expected_damage_for_profile,
    expected_damage_for_unit, p_threshold_success, p_unsaved, sweep_table, ward_factor,
    SWEPT_SAVES,
};

fn approx_eq(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "expected {b}, got {a}");
}

/// 10 attacks hitting on 4+, wounding on 4+, rend 0, damage 1, no flags.
fn spear_block() -> AttackProfile {
    AttackProfile {
        id: "p1".to_string(),
        name: "Spears".to_string(),
        kind: AttackKind::Melee,
        models: 5,
        attacks: 2,
        to_hit: 4,
        to_wound: 4,
        rend: 0,
        damage: 1,
        active: true,
        two_hits: false,
        auto_wound: false,
        mortal: false,
        all_out_attack: false,
    }
}

fn unit_with(profiles: Vec<AttackProfile>) -> UnitEntry {
    UnitEntry {
        id: "u1".to_string(),
        name: "Spear Block".to_string(),
        active: true,
        profiles,
    }
}

fn plain_target() -> TargetConfig {
    TargetConfig::default()
}

#[test]
fn threshold_probability_covers_the_whole_domain() {
    assert_eq!(p_threshold_success(-1), 1.0);
    assert_eq!(p_threshold_success(1), 1.0);
    approx_eq(p_threshold_success(2), 5.0 / 6.0, 1e-12);
    approx_eq(p_threshold_success(4), 0.5, 1e-12);
    approx_eq(p_threshold_success(6), 1.0 / 6.0, 1e-12);
    assert_eq!(p_threshold_success(7), 0.0);
    assert_eq!(p_threshold_success(10), 0.0);
}

#[test]
fn hit_modifiers_are_combined_then_clamped_once() {
    // Debuff and all-out attack cancel before any clamp can bite.
    assert_eq!(effective_hit_threshold(2, 1, true), 2);
    // The floor holds even when all-out attack would push below 2.
    assert_eq!(effective_hit_threshold(2, 0, true), 2);
    // The cap holds under the heaviest debuff.
    assert_eq!(effective_hit_threshold(5, 3, false), 6);
    assert_eq!(effective_hit_threshold(6, 3, true), 6);
}

#[test]
fn no_save_means_nothing_is_ever_saved() {
    assert_eq!(p_unsaved(None, 0), 1.0);
    assert_eq!(p_unsaved(None, 5), 1.0);
}

#[test]
fn rend_worsens_the_save_until_it_disappears() {
    approx_eq(p_unsaved(Some(4), 0), 0.5, 1e-12);
    approx_eq(p_unsaved(Some(4), 1), 2.0 / 3.0, 1e-12);
    assert_eq!(p_unsaved(Some(4), 3), 1.0);
}

#[test]
fn ward_outside_domain_is_disabled() {
    assert_eq!(ward_factor(0), 1.0);
    assert_eq!(ward_factor(1), 1.0);
    assert_eq!(ward_factor(7), 1.0);
    approx_eq(ward_factor(5), 2.0 / 3.0, 1e-12);
    approx_eq(ward_factor(2), 1.0 / 6.0, 1e-12);
}

#[test]
fn baseline_scenario_against_a_four_plus_save() {
    // Per attack: plain (2/6)*0.5*0.5 + crit (1/6)*0.5*0.5 = 0.125; ten attacks.
    let value = expected_damage_for_profile(&spear_block(), &plain_target(), Some(4));
    approx_eq(value, 1.25, 1e-9);
}

#[test]
fn baseline_scenario_without_a_save() {
    // Per attack: (2/6)*0.5 + (1/6)*0.5 = 0.25; ten attacks.
    let value = expected_damage_for_profile(&spear_block(), &plain_target(), None);
    approx_eq(value, 2.5, 1e-9);
}

#[test]
fn mortal_sixes_bypass_wound_and_save() {
    let profile = AttackProfile {
        mortal: true,
        ..spear_block()
    };
    // Crit bucket becomes a flat 1/6 per attack; plain bucket unchanged.
    let value = expected_damage_for_profile(&profile, &plain_target(), Some(4));
    approx_eq(value, 2.5, 1e-9);
}

#[test]
fn auto_wounding_sixes_still_face_the_save() {
    let profile = AttackProfile {
        auto_wound: true,
        ..spear_block()
    };
    // Crit bucket: (1/6)*1.0*0.5 per attack.
    let value = expected_damage_for_profile(&profile, &plain_target(), Some(4));
    approx_eq(value, 10.0 * (1.0 / 12.0 + 1.0 / 12.0), 1e-9);
}

#[test]
fn exploding_sixes_double_the_crit_bucket() {
    let profile = AttackProfile {
        two_hits: true,
        ..spear_block()
    };
    let value = expected_damage_for_profile(&profile, &plain_target(), Some(4));
    approx_eq(value, 10.0 * (1.0 / 12.0 + 1.0 / 12.0), 1e-9);
}

#[test]
fn natural_six_still_hits_when_the_threshold_is_out_of_reach() {
    let profile = AttackProfile {
        to_hit: 6,
        ..spear_block()
    };
    let target = TargetConfig {
        debuff_hit_enabled: true,
        debuff_hit_value: 3,
        ..TargetConfig::default()
    };
    // Plain bucket is empty at a clamped threshold of 6; only sixes land.
    let value = expected_damage_for_profile(&profile, &target, Some(4));
    approx_eq(value, 10.0 * (1.0 / 6.0) * 0.5 * 0.5, 1e-9);
}

#[test]
fn all_out_attack_improves_the_hit_roll() {
    let profile = AttackProfile {
        all_out_attack: true,
        ..spear_block()
    };
    let value = expected_damage_for_profile(&profile, &plain_target(), Some(4));
    // Effective 3+: plain (3/6)*0.25 + crit (1/6)*0.25 per attack.
    approx_eq(value, 10.0 * (0.125 + 1.0 / 24.0), 1e-9);
}

#[test]
fn ward_applies_after_everything_else() {
    let target = TargetConfig {
        ward_needed: 5,
        ..TargetConfig::default()
    };
    let with_ward = expected_damage_for_profile(&spear_block(), &target, Some(4));
    let without = expected_damage_for_profile(&spear_block(), &plain_target(), Some(4));
    approx_eq(with_ward, without * (2.0 / 3.0), 1e-9);
}

#[test]
fn inactive_and_empty_configurations_contribute_zero() {
    let inactive = AttackProfile {
        active: false,
        ..spear_block()
    };
    assert_eq!(
        expected_damage_for_profile(&inactive, &plain_target(), None),
        0.0
    );

    let no_models = AttackProfile {
        models: 0,
        ..spear_block()
    };
    assert_eq!(
        expected_damage_for_profile(&no_models, &plain_target(), None),
        0.0
    );

    let no_attacks = AttackProfile {
        attacks: 0,
        ..spear_block()
    };
    assert_eq!(
        expected_damage_for_profile(&no_attacks, &plain_target(), None),
        0.0
    );

    let negative = AttackProfile {
        models: -3,
        ..spear_block()
    };
    assert_eq!(
        expected_damage_for_profile(&negative, &plain_target(), None),
        0.0
    );

    let empty_unit = unit_with(Vec::new());
    assert_eq!(
        expected_damage_for_unit(&empty_unit, &plain_target(), Some(4)),
        0.0
    );

    let inactive_unit = UnitEntry {
        active: false,
        ..unit_with(vec![spear_block()])
    };
    assert_eq!(
        expected_damage_for_unit(&inactive_unit, &plain_target(), Some(4)),
        0.0
    );
}

#[test]
fn damage_scales_monotonically_with_offensive_stats() {
    let target = plain_target();
    let base = expected_damage_for_profile(&spear_block(), &target, Some(4));

    for (field, build) in [
        ("damage", AttackProfile {
            damage: 3,
            ..spear_block()
        }),
        ("attacks", AttackProfile {
            attacks: 4,
            ..spear_block()
        }),
        ("models", AttackProfile {
            models: 9,
            ..spear_block()
        }),
        ("rend", AttackProfile {
            rend: 2,
            ..spear_block()
        }),
    ] {
        let boosted = expected_damage_for_profile(&build, &target, Some(4));
        assert!(
            boosted >= base,
            "raising {field} should not lower expected damage: {boosted} < {base}"
        );
    }
}

#[test]
fn damage_drops_as_thresholds_get_harder() {
    let target = plain_target();
    let mut previous = f64::INFINITY;
    for to_hit in 2..=6 {
        let profile = AttackProfile {
            to_hit,
            ..spear_block()
        };
        let value = expected_damage_for_profile(&profile, &target, Some(4));
        assert!(
            value <= previous,
            "harder to-hit should not raise damage: {value} > {previous}"
        );
        previous = value;
    }

    let mut previous = f64::INFINITY;
    for to_wound in 2..=6 {
        let profile = AttackProfile {
            to_wound,
            ..spear_block()
        };
        let value = expected_damage_for_profile(&profile, &target, Some(4));
        assert!(value <= previous);
        previous = value;
    }

    // Stronger wards mitigate more.
    let mut previous = 0.0;
    for ward in [2, 3, 4, 5, 6] {
        let target = TargetConfig {
            ward_needed: ward,
            ..TargetConfig::default()
        };
        let value = expected_damage_for_profile(&spear_block(), &target, Some(4));
        assert!(value >= previous);
        previous = value;
    }
}

#[test]
fn roster_total_is_the_sum_of_unit_totals() {
    let units = vec![
        unit_with(vec![spear_block()]),
        UnitEntry {
            id: "u2".to_string(),
            name: "Archers".to_string(),
            active: true,
            profiles: vec![AttackProfile {
                kind: AttackKind::Shoot,
                to_hit: 3,
                ..spear_block()
            }],
        },
    ];
    let target = plain_target();
    let total = expected_damage_all(&units, &target, Some(4));
    let summed: f64 = units
        .iter()
        .map(|unit| expected_damage_for_unit(unit, &target, Some(4)))
        .sum();
    approx_eq(total, summed, 1e-12);
}

#[test]
fn repeat_evaluation_is_bit_identical() {
    let units = vec![unit_with(vec![spear_block()])];
    let target = TargetConfig {
        ward_needed: 6,
        debuff_hit_enabled: true,
        debuff_hit_value: 1,
    };
    let first = expected_damage_all(&units, &target, Some(3));
    let second = expected_damage_all(&units, &target, Some(3));
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn sweep_covers_every_save_and_the_unarmoured_row() {
    let units = vec![
        unit_with(vec![spear_block()]),
        UnitEntry {
            id: "u2".to_string(),
            name: "Reserves".to_string(),
            active: false,
            profiles: vec![spear_block()],
        },
    ];
    let target = plain_target();
    let table = sweep_table(&units, &target);

    assert_eq!(table.unit_names, vec!["Spear Block", "Reserves"]);
    assert_eq!(table.rows.len(), SWEPT_SAVES.len() + 1);
    for (row, save) in table.rows.iter().zip(SWEPT_SAVES) {
        assert_eq!(row.save, Some(save));
    }
    assert_eq!(table.rows.last().map(|row| row.save), Some(None));

    // Inactive units keep a zeroed column.
    for row in &table.rows {
        assert_eq!(row.per_unit.len(), 2);
        assert_eq!(row.per_unit[1], 0.0);
        approx_eq(row.total, row.per_unit.iter().sum(), 1e-12);
        approx_eq(
            row.total,
            expected_damage_all(&units, &target, row.save),
            1e-12,
        );
    }

    // Worse saves mean more damage, with no save worst of all.
    let totals: Vec<f64> = table.rows.iter().map(|row| row.total).collect();
    for pair in totals.windows(2) {
        assert!(pair[0] <= pair[1], "sweep totals should be non-decreasing");
    }
}
