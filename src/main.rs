//! Demo: ejecuta los escenarios básicos de cada utilidad e imprime el
//! resultado.
use indexmap::IndexMap;
use serde_json::{json, Value};
use wda_utils::config::{default_limit, init_dotenv, CONFIG};
use wda_utils::errors::CoreError;
use wda_utils::guard::FunctionGuard;
use wda_utils::{convert, inject_call, limit_depth, FnInvocable, HasInstanceId, InstanceId, KitError, Parameter, Signature};

/// Invocación selectiva: default aplicado y clave extra ignorada.
fn run_inject_demo() -> Result<(), CoreError> {
    let sig = Signature::new(vec![Parameter::required("a"), Parameter::optional("b", json!(5))])?;
    let add = FnInvocable::new("add", sig, |args| Ok(json!(args.get_as::<i64>("a")? + args.get_as::<i64>("b")?)));
    let pool: IndexMap<String, Value> = [("a".to_string(), json!(2)), ("z".to_string(), json!(9))].into_iter().collect();
    let out = inject_call(&add, vec![], pool)?;
    println!("[inject] add(a=2, z=9) -> {out}");
    Ok(())
}

/// Profundidad máxima que recorre la demo, sea cual sea el límite configurado.
const DEMO_MAX_RECURSION: usize = 16;

/// Recursiones a intentar: hasta una más que el límite, acotado.
fn demo_recursions(limit: usize) -> std::ops::RangeInclusive<usize> { 0..=limit.saturating_add(1).min(DEMO_MAX_RECURSION) }

fn depth(guard: &FunctionGuard, n: usize) -> Result<usize, KitError> { guard.try_run(|| if n == 0 { Ok(0) } else { depth(guard, n - 1).map(|v| v + 1) }) }

/// Guard de profundidad sobre una función recursiva.
fn run_guard_demo() {
    let limit = default_limit();
    let guard = limit.function("depth");
    println!("[guard] limit={} (WDA_DEFAULT_CALL_DEPTH={})", limit.get(), CONFIG.guard.default_call_depth);
    for n in demo_recursions(limit.get()) {
        match depth(&guard, n) {
            Ok(v) => println!("[guard] recursion {n}: ok ({v})"),
            Err(e) => println!("[guard] recursion {n}: {e}"),
        }
    }
}

struct Session {
    id: InstanceId,
    name: &'static str,
}

impl HasInstanceId for Session {
    fn instance_id(&self) -> InstanceId { self.id }
}

/// Guard por instancia: dos sesiones con presupuestos independientes.
fn run_method_guard_demo() {
    let guard = limit_depth(1).per_instance("Session::retry");
    let sessions = [Session { id: InstanceId::new(), name: "s1" }, Session { id: InstanceId::new(), name: "s2" }];
    for s in sessions.iter() {
        let res = guard.try_run_on(s, || guard.try_run_on(s, || Ok::<_, KitError>(s.name)));
        println!("[method-guard] {} nested once -> {:?}", s.name, res);
    }
}

/// Mapa con acceso por atributo.
fn run_attrs_demo() {
    let m = convert([("x", json!(1))]);
    println!("[attrs] x -> {:?}", m.attr("x"));
    println!("[attrs] y -> {:?}", m.attr("y"));
}

fn main() {
    init_dotenv();
    if let Err(e) = run_inject_demo() {
        eprintln!("[inject] failed: {e}");
    }
    run_guard_demo();
    run_method_guard_demo();
    run_attrs_demo();
}
