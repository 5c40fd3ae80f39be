mod common;

use agent::{
    ArenaConfig, AxisInput, EnvError, EpisodeController, EpisodeEnd, MaterialKind, Phase,
    SequenceSource,
};
use common::{draw_for, identity, ScriptedBody};
use physics::{ColliderTag, Vec3};

fn controller() -> EpisodeController<String> {
    let config = ArenaConfig::default();
    let materials = config.materials.clone();
    EpisodeController::new(config, materials)
}

/// Controller reset with the target pinned at `(x, 0.5, z)`.
fn started_at(x: f32, z: f32) -> (EpisodeController<String>, ScriptedBody) {
    let mut ctl = controller();
    let mut body = ScriptedBody::new();
    let mut rng = SequenceSource::new(vec![draw_for(x), draw_for(z)]);
    ctl.reset(&mut body, &mut rng).unwrap();
    (ctl, body)
}

#[test]
fn reset_restores_start_pose_and_bounds_target() {
    let mut ctl = controller();
    let mut body = ScriptedBody::new();
    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..500 {
        ctl.reset(&mut body, &mut rng).unwrap();
        assert_eq!(body.pos, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(body.vel, Vec3::ZERO);
        assert_eq!(body.angular_vel, Vec3::ZERO);
        assert_eq!(body.orientation, identity());

        let target = ctl.target();
        assert!((-14.0..=14.0).contains(&target.x));
        assert!((-14.0..=14.0).contains(&target.z));
        assert!((target.y - 0.5).abs() < f32::EPSILON);
        assert_eq!(ctl.phase(), Phase::Active);
    }
}

#[test]
fn target_uses_x_then_z_draws() {
    let mut ctl = controller();
    let mut body = ScriptedBody::new();
    let mut rng = SequenceSource::new(vec![0.5, 0.25]);
    ctl.reset(&mut body, &mut rng).unwrap();
    assert_eq!(ctl.target(), Vec3::new(0.0, 0.5, -7.0));

    let mut rng = SequenceSource::new(vec![0.0, 0.999_999]);
    ctl.reset(&mut body, &mut rng).unwrap();
    assert!((ctl.target().x + 14.0).abs() < 1e-6);
    assert!(ctl.target().z < 14.0);
}

#[test]
fn observation_layout_is_target_then_agent_then_planar_velocity() {
    let (ctl, mut body) = started_at(5.0, -3.0);
    body.pos = Vec3::new(1.5, 0.5, -2.5);
    body.vel = Vec3::new(0.25, 9.0, -0.75);

    let obs = ctl.observe(&body).unwrap().to_array();
    assert_eq!(obs.len(), 8);
    let target = ctl.target();
    assert_eq!(obs[0..3], [target.x, target.y, target.z]);
    assert_eq!(obs[3..6], [1.5, 0.5, -2.5]);
    assert_eq!(obs[6..8], [0.25, -0.75]);
}

#[test]
fn reaching_the_target_succeeds_whatever_the_action() {
    for action in [[0.0, 0.0], [1.0, 1.0], [-1.0, 0.5], [0.3, -0.9]] {
        let (mut ctl, mut body) = started_at(5.0, -3.0);
        body.next_position = Some(Vec3::new(5.0 - 1.2, 0.5, -3.0));

        let outcome = ctl.step(&action, &mut body).unwrap();
        assert!((outcome.reward - 1.0).abs() < f32::EPSILON);
        assert!(outcome.done);
        assert_eq!(outcome.end, Some(EpisodeEnd::Success));
        assert_eq!(ctl.phase(), Phase::Finished(EpisodeEnd::Success));
        assert_eq!(ctl.flash().shown(), MaterialKind::Success);
        assert!(ctl
            .flash()
            .surfaces()
            .iter()
            .all(|m| m == "Materials/SuccessMaterial"));
    }
}

#[test]
fn success_threshold_is_inclusive() {
    let (mut ctl, mut body) = started_at(0.0, -7.0);
    body.next_position = Some(Vec3::new(0.0, 0.5, -5.75));
    let outcome = ctl.step(&[0.0, 0.0], &mut body).unwrap();
    assert!((outcome.distance - 1.25).abs() < 1e-6);
    assert_eq!(outcome.end, Some(EpisodeEnd::Success));
}

#[test]
fn wall_contact_away_from_target_fails() {
    let (mut ctl, mut body) = started_at(5.0, -3.0);
    body.next_position = Some(Vec3::new(-14.5, 0.5, 0.0));
    body.next_contacts = vec![ColliderTag::Wall];

    let outcome = ctl.step(&[-1.0, 0.0], &mut body).unwrap();
    assert!((outcome.reward + 0.5).abs() < f32::EPSILON);
    assert!(outcome.done);
    assert_eq!(outcome.end, Some(EpisodeEnd::Failure));
    assert_eq!(ctl.flash().shown(), MaterialKind::Fail);
    assert!(ctl
        .flash()
        .surfaces()
        .iter()
        .all(|m| m == "Materials/FailMaterial"));
}

#[test]
fn untagged_contact_is_not_a_failure() {
    let (mut ctl, mut body) = started_at(5.0, -3.0);
    body.next_contacts = vec![ColliderTag::Untagged];
    let outcome = ctl.step(&[0.0, 0.0], &mut body).unwrap();
    assert!(!outcome.done);
    assert_eq!(outcome.end, None);
}

#[test]
fn success_wins_over_simultaneous_wall_contact() {
    let (mut ctl, mut body) = started_at(13.5, 0.0);
    body.next_position = Some(Vec3::new(14.5, 0.5, 0.0));
    body.next_contacts = vec![ColliderTag::Wall];

    let outcome = ctl.step(&[1.0, 0.0], &mut body).unwrap();
    assert_eq!(outcome.end, Some(EpisodeEnd::Success));
    assert!((outcome.reward - 1.0).abs() < f32::EPSILON);
    assert_eq!(ctl.stats().failures, 0);
}

#[test]
fn ordinary_step_applies_scaled_force_and_no_reward() {
    let (mut ctl, mut body) = started_at(5.0, -3.0);
    let outcome = ctl.step(&[0.4, -0.7], &mut body).unwrap();

    assert_eq!(outcome.reward, 0.0);
    assert!(!outcome.done);
    assert_eq!(outcome.end, None);
    let expected = Vec3::new(4.0, 0.0, -7.0);
    assert!((outcome.applied_force - expected).length() < 1e-6);
    assert_eq!(body.forces, vec![outcome.applied_force]);
    assert_eq!(body.ticks, 1);
    assert_eq!(ctl.flash().shown(), MaterialKind::Regular);
}

#[test]
fn use_before_reset_is_invalid_state() {
    let mut ctl = controller();
    let mut body = ScriptedBody::new();
    assert!(matches!(ctl.observe(&body), Err(EnvError::InvalidState(_))));
    assert!(matches!(ctl.step(&[0.0, 0.0], &mut body), Err(EnvError::InvalidState(_))));
    assert!(body.forces.is_empty());
    assert_eq!(body.ticks, 0);
}

#[test]
fn wrong_action_length_is_invalid_argument() {
    let (mut ctl, mut body) = started_at(5.0, -3.0);
    assert_eq!(
        ctl.step(&[1.0], &mut body),
        Err(EnvError::InvalidArgument { expected: 2, actual: 1 })
    );
    assert_eq!(
        ctl.step(&[1.0, 0.0, 0.0], &mut body),
        Err(EnvError::InvalidArgument { expected: 2, actual: 3 })
    );
    assert!(body.forces.is_empty(), "rejected actions never reach the host");
    assert_eq!(ctl.phase(), Phase::Active);
}

#[test]
fn finished_episode_needs_reset() {
    let (mut ctl, mut body) = started_at(5.0, -3.0);
    body.next_contacts = vec![ColliderTag::Wall];
    assert!(ctl.step(&[0.0, 0.0], &mut body).unwrap().done);

    assert!(matches!(ctl.step(&[0.0, 0.0], &mut body), Err(EnvError::InvalidState(_))));
    // The final observation is still readable.
    assert!(ctl.observe(&body).is_ok());

    let mut rng = SequenceSource::new(vec![0.1, 0.9]);
    ctl.reset(&mut body, &mut rng).unwrap();
    assert!(ctl.step(&[0.0, 0.0], &mut body).is_ok());
}

#[test]
fn one_terminal_reward_per_episode() {
    let (mut ctl, mut body) = started_at(5.0, -3.0);
    let mut rewards = Vec::new();
    for i in 0..10 {
        if i == 9 {
            body.next_contacts = vec![ColliderTag::Wall];
        }
        let outcome = ctl.step(&[0.1, 0.1], &mut body).unwrap();
        rewards.push(outcome.reward);
        if outcome.done {
            break;
        }
    }
    assert_eq!(rewards.iter().filter(|r| **r != 0.0).count(), 1);
    assert_eq!(ctl.stats().episode_steps, 10);
    assert!((ctl.stats().episode_reward + 0.5).abs() < f32::EPSILON);
}

#[test]
fn reset_twice_gives_identical_agent_state() {
    let mut ctl = controller();
    let mut body = ScriptedBody::new();
    let mut rng = fastrand::Rng::with_seed(5);

    ctl.reset(&mut body, &mut rng).unwrap();
    let first = (body.pos, body.vel, body.angular_vel, body.orientation);
    body.pos = Vec3::new(9.0, 0.5, 9.0);
    body.vel = Vec3::new(-3.0, 0.0, 2.0);

    ctl.reset(&mut body, &mut rng).unwrap();
    let second = (body.pos, body.vel, body.angular_vel, body.orientation);
    assert_eq!(first, second);
    assert_eq!(ctl.stats().episodes_started, 2);
}

#[test]
fn step_limit_interrupts_without_terminal_reward() {
    let config = ArenaConfig { max_steps: 3, ..ArenaConfig::default() };
    let materials = config.materials.clone();
    let mut ctl = EpisodeController::new(config, materials);
    let mut body = ScriptedBody::new();
    let mut rng = SequenceSource::new(vec![draw_for(10.0), draw_for(10.0)]);
    ctl.reset(&mut body, &mut rng).unwrap();

    assert!(!ctl.step(&[0.0, 0.0], &mut body).unwrap().done);
    assert!(!ctl.step(&[0.0, 0.0], &mut body).unwrap().done);
    let last = ctl.step(&[0.0, 0.0], &mut body).unwrap();
    assert!(last.done);
    assert_eq!(last.end, Some(EpisodeEnd::Interrupted));
    assert_eq!(last.reward, 0.0);
    assert_eq!(ctl.flash().shown(), MaterialKind::Regular);
    assert_eq!(ctl.flash().pending(), 0);
    assert_eq!(ctl.stats().interruptions, 1);
}

#[test]
fn heuristic_passes_axes_through() {
    let ctl = controller();
    assert_eq!(ctl.heuristic_action(AxisInput::new(-0.25, 1.0)), [-0.25, 1.0]);
}

#[test]
fn flash_reverts_half_a_second_later() {
    let (mut ctl, mut body) = started_at(10.0, 10.0);
    body.next_contacts = vec![ColliderTag::Wall];
    ctl.step(&[0.0, 0.0], &mut body).unwrap();
    assert_eq!(ctl.flash().shown(), MaterialKind::Fail);

    // The flash does not gate the next episode.
    let mut rng = SequenceSource::new(vec![draw_for(10.0), draw_for(10.0)]);
    ctl.reset(&mut body, &mut rng).unwrap();
    for _ in 0..24 {
        ctl.step(&[0.0, 0.0], &mut body).unwrap();
    }
    assert_eq!(ctl.flash().shown(), MaterialKind::Fail);

    for _ in 0..2 {
        ctl.step(&[0.0, 0.0], &mut body).unwrap();
    }
    assert_eq!(ctl.flash().shown(), MaterialKind::Regular);
    assert!(ctl
        .flash()
        .surfaces()
        .iter()
        .all(|m| m == "Materials/EnvironmentMaterial"));
    assert_eq!(ctl.flash().pending(), 0);
}

#[test]
fn idle_ticks_also_fire_reverts() {
    let mut ctl = controller();
    ctl.on_terminal_visual(MaterialKind::Success);
    assert_eq!(ctl.flash().shown(), MaterialKind::Success);
    for _ in 0..30 {
        ctl.idle_tick();
    }
    assert_eq!(ctl.flash().shown(), MaterialKind::Regular);
}

#[test]
fn reconfigure_requires_a_fresh_reset() {
    let (mut ctl, mut body) = started_at(5.0, -3.0);
    let config = ArenaConfig { move_multiplier: 2.0, ..ArenaConfig::default() };
    let materials = config.materials.clone();
    ctl.reconfigure(config, materials);
    assert_eq!(ctl.phase(), Phase::Uninitialised);
    assert!(ctl.step(&[1.0, 0.0], &mut body).is_err());

    let mut rng = SequenceSource::new(vec![draw_for(5.0), draw_for(-3.0)]);
    ctl.reset(&mut body, &mut rng).unwrap();
    let outcome = ctl.step(&[1.0, 0.0], &mut body).unwrap();
    assert!((outcome.applied_force.x - 2.0).abs() < f32::EPSILON);
}
