//! Integration tests for the wave geometry engine.


use liquid_wave::wave::{build_path, SizePreset, ViewportGeometry, WaveRuntimeState, HORIZONTAL_STEP};
use wave_fixtures::{assorted_bounds, config_with, test_config, viewport};

// ==================== Phase Advancement ====================

#[test]
fn test_offset_after_n_ticks() {
    for preset in SizePreset::all() {
        let hz = preset.params().angular_hz;
        let mut state = WaveRuntimeState::default();
        for n in 1..=2000u32 {
            state = state.advance(hz);
            let expected = n as f64 * hz as f64;
            assert!(state.foreground_offset >= 0.0);
            assert!(
                (state.foreground_offset - expected).abs() <= expected * 1e-4 + 1e-5,
                "{:?}: tick {} offset {} expected {}",
                preset,
                n,
                state.foreground_offset,
                expected
            );
        }
    }
}

#[test]
fn test_offsets_never_decrease_until_wrap() {
    let hz = SizePreset::Large.params().angular_hz;
    let mut state = WaveRuntimeState::new(&SizePreset::Large.params());
    for _ in 0..500 {
        let next = state.advance(hz);
        assert!(next.foreground_offset >= state.foreground_offset);
        assert!(next.background_offset >= state.background_offset);
        state = next;
    }
}

#[test]
fn test_offset_wraps_to_zero_at_float_limit() {
    let state = WaveRuntimeState {
        foreground_offset: f64::MAX,
        background_offset: f64::MAX,
    };
    let wrapped = state.advance(0.12);
    assert_eq!(wrapped, WaveRuntimeState::default());

    // Wrapping restarts the normal progression.
    let next = wrapped.advance(0.12);
    assert!((next.foreground_offset - 0.12).abs() < 1e-6);
}

// ==================== Path Shape ====================

#[test]
fn test_path_endpoints_for_any_viewport() {
    let config = test_config();
    let state = WaveRuntimeState { foreground_offset: 2.7, background_offset: 0.0 };

    for bounds in assorted_bounds() {
        let viewport = ViewportGeometry::new(bounds, &config);
        let path = build_path(&config, &viewport, &state);

        let bottom = viewport.bottom as f32;
        assert_eq!(path.first(), Some([0.0, bottom]), "{:?}", bounds);
        assert_eq!(path.last(), Some([viewport.right as f32, bottom]), "{:?}", bounds);
    }
}

#[test]
fn test_interior_x_steps_to_max_right() {
    let config = test_config();
    let viewport = viewport(&config, 333, 120);
    let path = build_path(&config, &viewport, &WaveRuntimeState::default());

    let xs: Vec<f32> = path.interior().iter().map(|p| p[0]).collect();
    assert_eq!(xs[0], 0.0);
    for pair in xs.windows(2) {
        assert!((pair[1] - pair[0] - HORIZONTAL_STEP).abs() < 1e-4);
    }
    let last = *xs.last().unwrap();
    assert!(last <= viewport.max_right);
    assert!(last + HORIZONTAL_STEP > viewport.max_right);
}

#[test]
fn test_unrecognized_preset_draws_flat_line() {
    let config = config_with(SizePreset::Unrecognized, 0.3);
    let viewport = viewport(&config, 200, 150);
    let state = WaveRuntimeState { foreground_offset: 1.1, background_offset: 0.0 };
    let path = build_path(&config, &viewport, &state);

    let level = (150.0f32 * 0.3).max(0.0);
    assert!(!path.interior().is_empty());
    for point in path.interior() {
        assert!((point[1] - level).abs() < 1e-4, "y {} != {}", point[1], level);
    }
}

#[test]
fn test_middle_preset_worked_example() {
    let config = config_with(SizePreset::Middle, 0.5);
    let viewport = viewport(&config, 200, 200);
    let path = build_path(&config, &viewport, &WaveRuntimeState::default());

    // omega * 0 + 0 = 0, so y = 8 * sin(0) + max(8, 100) = 100.
    assert!((path.interior()[0][1] - 100.0).abs() < 1e-4);
}

#[test]
fn test_wave_shape_repeats_after_one_wavelength() {
    let config = config_with(SizePreset::Little, 0.5);
    // Little: wavelength = 0.5 * 200 = 100px, i.e. 5 samples.
    let viewport = viewport(&config, 200, 200);
    let path = build_path(&config, &viewport, &WaveRuntimeState::default());
    let interior = path.interior();

    for i in 0..interior.len() - 5 {
        assert!((interior[i][1] - interior[i + 5][1]).abs() < 1e-3);
    }
}

#[test]
fn test_large_amplitude_lifts_baseline() {
    let config = config_with(SizePreset::Large, 0.1);
    let viewport = viewport(&config, 200, 200);
    let path = build_path(&config, &viewport, &WaveRuntimeState::default());

    // Baseline is max(46, 20) = 46, so the crest touches y = 0 at most.
    let top = path.interior().iter().map(|p| p[1]).fold(f32::INFINITY, f32::min);
    let low = path.interior().iter().map(|p| p[1]).fold(f32::NEG_INFINITY, f32::max);
    assert!(top >= -1e-3);
    assert!(low <= 92.0 + 1e-3);
}
