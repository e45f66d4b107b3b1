use crate::{Result, Scanner};

/// Maximum nesting of `attempt` scopes. Parsing function calls mirror the
/// input's nesting depth on the control stack; the guard turns runaway
/// recursion into a `DepthExceeded` failure instead of a stack overflow.
pub const MAX_DEPTH: usize = 512;

/// Runs `f` inside one backtracking scope: the cursor position is
/// snapshotted on entry and restored exactly on failure, so failed
/// exploration never leaks partial consumption into the parent scope.
pub fn attempt<'s, O, F>(s: &mut Scanner<'s>, f: F) -> Result<O>
where
    F: FnOnce(&mut Scanner<'s>) -> Result<O>,
{
    let start = s.position();
    s.enter(MAX_DEPTH)?;
    let result = f(s);
    s.leave();
    match result {
        Ok(out) => Ok(out),
        Err(e) => {
            s.set_position(start);
            Err(e)
        }
    }
}

/// An `attempt` whose failure is swallowed: no value produced, cursor
/// rewound.
pub fn maybe<'s, O, F>(s: &mut Scanner<'s>, f: F) -> Option<O>
where
    F: FnOnce(&mut Scanner<'s>) -> Result<O>,
{
    attempt(s, f).ok()
}

/// Zero-or-more repetition: accumulates successes in order and stops,
/// without failing, on the first non-match (rewinding it). Zero matches
/// yield an empty vec. A success that leaves the cursor in place also
/// stops the loop: a nullable pattern would otherwise match forever.
pub fn many0<'s, O, F>(s: &mut Scanner<'s>, mut f: F) -> Vec<O>
where
    F: FnMut(&mut Scanner<'s>) -> Result<O>,
{
    let mut acc = Vec::new();
    loop {
        let start = s.position();
        match f(s) {
            Ok(out) => {
                acc.push(out);
                if s.position() == start {
                    break;
                }
            }
            Err(_) => {
                s.set_position(start);
                break;
            }
        }
    }
    acc
}
