use birthday_core::*;

#[test]
fn particles_burst_then_trickle() {
    let mut registry = ElementRegistry::new();
    let mut emitter = Emitter::new(EmitterSpec::PARTICLES, 7);
    emitter.mount(0);
    assert!(emitter.has_steady_timer());
    assert_eq!(emitter.pending_spawns(), 51);

    emitter.advance(0, &mut registry);
    assert_eq!(registry.len(), 1);

    emitter.advance(14_700, &mut registry);
    // 50 staggered initial spawns plus the steady ones at 500..=14_500
    assert_eq!(emitter.spawned(), 50 + 29);
    assert_eq!(registry.len(), 79);

    for el in registry.iter() {
        assert!((0.0..1.0).contains(&el.position.x));
        assert!((0.0..15.0).contains(&el.delay_sec));
        assert!((10.0..20.0).contains(&el.duration_sec));
        assert_eq!(el.expires_at, el.spawned_at + 15_000);
        assert!(matches!(el.kind, ElementKind::Particle { color, glow }
            if color < PARTICLE_COLORS.len() && glow < PARTICLE_COLORS.len()));
    }
}

#[test]
fn elements_expire_after_their_lifetime() {
    let mut registry = ElementRegistry::new();
    let mut emitter = Emitter::new(EmitterSpec::BUBBLES, 1);
    emitter.mount(0);
    emitter.advance(0, &mut registry);
    assert_eq!(registry.len(), 1);

    assert_eq!(registry.sweep(11_999), 0);
    assert_eq!(registry.sweep(12_000), 1);
    assert!(registry.is_empty());
}

#[test]
fn bubbles_follow_their_own_cadence() {
    let mut registry = ElementRegistry::new();
    let mut emitter = Emitter::new(EmitterSpec::BUBBLES, 3);
    emitter.mount(0);
    emitter.advance(11_999, &mut registry);
    // initial at 0, 4000, 8000; steady at 6000
    assert_eq!(emitter.spawned(), 4);
    emitter.advance(12_000, &mut registry);
    assert_eq!(emitter.spawned(), 5);
    assert!(registry.iter().all(|e| matches!(e.kind, ElementKind::Bubble { quote, glow }
        if quote < BUBBLE_QUOTES.len() && glow < BUBBLE_GLOWS.len())));
}

#[test]
fn unmount_stops_spawning_but_lets_elements_expire() {
    let mut registry = ElementRegistry::new();
    let mut emitter = Emitter::new(EmitterSpec::PARTICLES, 9);
    emitter.mount(0);
    emitter.advance(1_000, &mut registry);
    let live = registry.len();
    assert!(live > 0);

    emitter.unmount();
    assert!(!emitter.is_mounted());
    assert!(!emitter.has_steady_timer());
    assert_eq!(emitter.pending_spawns(), 0);

    emitter.advance(60_000, &mut registry);
    assert_eq!(registry.len(), live);
    registry.sweep(60_000);
    assert!(registry.is_empty());
}

#[test]
fn same_seed_same_layout() {
    let mut a = ElementRegistry::new();
    let mut b = ElementRegistry::new();
    let mut ea = Emitter::new(EmitterSpec::PARTICLES, 42);
    let mut eb = Emitter::new(EmitterSpec::PARTICLES, 42);
    ea.mount(0);
    eb.mount(0);
    ea.advance(3_000, &mut a);
    eb.advance(3_000, &mut b);
    let id = ElementId(5);
    assert_eq!(a.get(id), b.get(id));
}

#[test]
fn double_removal_is_harmless() {
    let mut registry = ElementRegistry::new();
    let id = registry.spawn(
        ElementKind::ConfettiBurst { particles: 12 },
        glam::Vec2::new(0.2, 0.1),
        0.0,
        1.0,
        0,
        1_000,
    );
    assert_eq!(registry.drain_changes(), vec![RegistryChange::Spawned(id)]);
    assert!(registry.expire(id));
    assert!(!registry.expire(id));
    assert_eq!(registry.sweep(5_000), 0);
    assert_eq!(registry.drain_changes(), vec![RegistryChange::Expired(id)]);
    assert!(registry.drain_changes().is_empty());
}

#[test]
fn clear_reports_every_element() {
    let mut registry = ElementRegistry::new();
    for i in 0..3 {
        registry.spawn(
            ElementKind::Particle { color: 0, glow: 0 },
            glam::Vec2::ZERO,
            0.0,
            1.0,
            i,
            10,
        );
    }
    registry.drain_changes();
    registry.clear();
    assert!(registry.is_empty());
    assert_eq!(registry.drain_changes().len(), 3);
}

#[test]
fn emitter_specs_validate() {
    assert!(EmitterSpec::PARTICLES.validate("particles").is_ok());
    let mut broken = EmitterSpec::BUBBLES;
    broken.interval_ms = 0;
    assert!(broken.validate("bubbles").is_err());
    let mut inverted = EmitterSpec::BUBBLES;
    inverted.duration_range_sec = [18.0, 10.0];
    assert!(inverted.validate("bubbles").is_err());
}
