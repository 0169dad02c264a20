use std::env;

/// Restores the captured variables when dropped, so a failing assertion inside
/// [`with_env`] does not leak overrides into later tests.
struct EnvRestore(Vec<(String, Option<String>)>);

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, previous) in self.0.drain(..) {
            match previous {
                Some(value) => env::set_var(&key, value),
                None => env::remove_var(&key),
            }
        }
    }
}

/// Runs `f` with `vars` set. Callers must be `#[serial]`.
pub fn with_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _restore = EnvRestore(
        vars.iter()
            .map(|(key, _)| (key.to_string(), env::var(key).ok()))
            .collect(),
    );

    for (key, value) in vars {
        env::set_var(key, value);
    }

    f()
}
