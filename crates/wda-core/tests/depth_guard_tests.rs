use once_cell::sync::Lazy;
use std::sync::Barrier;

use wda_core::guard::{limit_depth, FunctionGuard, HasInstanceId, InstanceId, MethodGuard};
use wda_core::KitError;

fn recurse(guard: &FunctionGuard, remaining: u32) -> Result<u32, KitError> {
    guard.try_run(|| if remaining == 0 { Ok(0) } else { recurse(guard, remaining - 1).map(|v| v + 1) })
}

#[test]
fn zero_limit_allows_single_call_only() {
    let guard = limit_depth(0).function("recurse");
    assert_eq!(recurse(&guard, 0).unwrap(), 0);
    assert_eq!(recurse(&guard, 1).unwrap_err(), KitError::DepthExceeded { limit: 0 });
    assert_eq!(guard.depth(), 0);
}

#[test]
fn limit_n_admits_n_plus_one_nested_calls() {
    let guard = limit_depth(3).function("recurse");
    assert_eq!(recurse(&guard, 3).unwrap(), 3);
    assert!(recurse(&guard, 4).unwrap_err().is_depth_exceeded());
}

#[test]
fn failing_body_releases_depth() {
    let guard = limit_depth(1).function("fails");
    let _ = guard.try_run(|| -> Result<(), KitError> { Err(KitError::CallFailed("nope".into())) });
    assert_eq!(guard.depth(), 0);

    let nested: Result<(), KitError> = guard.try_run(|| guard.try_run(|| guard.try_run(|| Ok(()))));
    assert!(nested.is_err());
    assert_eq!(guard.depth(), 0);
}

#[test]
fn panicking_body_releases_depth() {
    let guard = limit_depth(0).function("panics");
    let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = guard.run(|| panic!("body panicked"));
    }));
    assert!(caught.is_err());
    assert_eq!(guard.depth(), 0);
    assert!(guard.run(|| ()).is_ok());
}

struct Walker {
    id: InstanceId,
}

impl HasInstanceId for Walker {
    fn instance_id(&self) -> InstanceId { self.id }
}

static WALK_GUARD: Lazy<MethodGuard> = Lazy::new(|| limit_depth(1).per_instance("Walker::walk"));

impl Walker {
    fn new() -> Self { Self { id: InstanceId::new() } }

    fn walk(&self, steps: u32, other: Option<&Walker>) -> Result<u32, KitError> {
        WALK_GUARD.try_run_on(self, || {
            if let Some(o) = other {
                // otra instancia: presupuesto propio
                o.walk(1, None)?;
            }
            if steps == 0 { Ok(0) } else { self.walk(steps - 1, None).map(|v| v + 1) }
        })
    }
}

#[test]
fn instances_track_depth_independently() {
    let a = Walker::new();
    let b = Walker::new();
    // a recursa un nivel y, dentro, b recursa un nivel propio
    assert_eq!(a.walk(1, Some(&b)).unwrap(), 1);
    assert!(a.walk(2, None).unwrap_err().is_depth_exceeded());
    assert_eq!(WALK_GUARD.depth_of(&a), 0);
    assert_eq!(WALK_GUARD.depth_of(&b), 0);
}

#[test]
fn concurrent_entries_admit_exactly_limit_plus_one() {
    const THREADS: usize = 8;
    let limit = 3;
    let guard = limit_depth(limit).per_instance("shared");
    let owner = InstanceId::new();
    let start = Barrier::new(THREADS);
    let held = Barrier::new(THREADS);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(THREADS).build().unwrap();

    // cada hilo intenta entrar mientras los admitidos siguen en vuelo
    let outcomes: Vec<Result<(), KitError>> = pool.broadcast(|_| {
                                                      start.wait();
                                                      let attempt = guard.enter(owner);
                                                      held.wait();
                                                      attempt.map(|_ticket| ())
                                                  });

    let admitted = outcomes.iter().filter(|o| o.is_ok()).count();
    let rejected = outcomes.iter().filter(|o| matches!(o, Err(KitError::DepthExceeded { limit: 3 }))).count();
    assert_eq!(admitted, limit + 1);
    assert_eq!(rejected, THREADS - limit - 1);
    assert_eq!(guard.depth(&owner), 0);
    assert_eq!(guard.active_owners(), 0);
}

#[test]
fn instance_ids_are_unique_handles() {
    let a = InstanceId::new();
    let b = InstanceId::new();
    assert_ne!(a, b);
    assert_ne!(a.as_uuid(), b.as_uuid());
    assert_eq!(a.to_string(), a.as_uuid().to_string());
}
