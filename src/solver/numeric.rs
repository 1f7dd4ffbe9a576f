//! Bounded numerical methods: bracketing, Brent's root-finder and the
//! Nelder-Mead simplex.
//!
//! Every routine either reports convergence explicitly or returns an
//! [`EquilibriumError`]; none hands back a best guess after running out of
//! iterations.

use crate::config::{BracketOptions, RootOptions, SimplexOptions};
use crate::core::error::{ensure_finite, EquilibriumError, Result};
use log::{debug, trace, warn};

/// A converged root of a scalar function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub x: f64,
    /// Function value at `x`.
    pub residual: f64,
    pub iterations: usize,
}

/// An interval whose endpoints bracket a sign change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub lower: f64,
    pub upper: f64,
}

fn straddles(a: f64, b: f64) -> bool {
    a == 0.0 || b == 0.0 || (a < 0.0) != (b < 0.0)
}

/// Search outward from a positive `seed` for a sign change of `f`.
///
/// Both ends move geometrically (`seed / g^k` and `seed * g^k`), so the
/// search stays on the positive half-line. If `f(seed)` is exactly zero the
/// degenerate bracket `[seed, seed]` is returned.
pub fn bracket_around<F>(mut f: F, seed: f64, options: &BracketOptions) -> Result<Bracket>
where
    F: FnMut(f64) -> Result<f64>,
{
    let mut eval = |x: f64| -> Result<f64> { ensure_finite("bracketed function", f(x)?) };

    let f_seed = eval(seed)?;
    if f_seed == 0.0 {
        return Ok(Bracket {
            lower: seed,
            upper: seed,
        });
    }

    let (mut lo, mut f_lo) = (seed, f_seed);
    let (mut hi, mut f_hi) = (seed, f_seed);
    for expansion in 1..=options.max_expansions {
        let next_lo = lo / options.growth;
        let f_next_lo = eval(next_lo)?;
        if straddles(f_next_lo, f_lo) {
            debug!("bracket [{next_lo}, {lo}] found after {expansion} expansions");
            return Ok(Bracket {
                lower: next_lo,
                upper: lo,
            });
        }
        lo = next_lo;
        f_lo = f_next_lo;

        let next_hi = hi * options.growth;
        let f_next_hi = eval(next_hi)?;
        if straddles(f_hi, f_next_hi) {
            debug!("bracket [{hi}, {next_hi}] found after {expansion} expansions");
            return Ok(Bracket {
                lower: hi,
                upper: next_hi,
            });
        }
        hi = next_hi;
        f_hi = f_next_hi;
    }

    warn!("no sign change in [{lo}, {hi}] around seed {seed}");
    Err(EquilibriumError::NoSignChange {
        lower: lo,
        upper: hi,
    })
}

/// Brent's method on `[lower, upper]`.
///
/// Requires `f(lower)` and `f(upper)` to differ in sign (or one of them to be
/// zero). Stops when the bracket has shrunk below the tolerance.
pub fn brent<F>(mut f: F, lower: f64, upper: f64, options: &RootOptions) -> Result<Root>
where
    F: FnMut(f64) -> Result<f64>,
{
    let mut eval = |x: f64| -> Result<f64> { ensure_finite("root-finder objective", f(x)?) };

    let (mut a, mut b) = (lower, upper);
    let mut fa = eval(a)?;
    if fa == 0.0 {
        return Ok(Root {
            x: a,
            residual: 0.0,
            iterations: 0,
        });
    }
    let mut fb = eval(b)?;
    if fb == 0.0 {
        return Ok(Root {
            x: b,
            residual: 0.0,
            iterations: 0,
        });
    }
    if !straddles(fa, fb) {
        return Err(EquilibriumError::NoSignChange { lower, upper });
    }

    let (mut c, mut fc) = (b, fb);
    let mut d = b - a;
    let mut e = d;

    for iteration in 1..=options.max_iterations {
        if (fb > 0.0) == (fc > 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * options.tolerance * b.abs().max(1.0);
        let half_width = 0.5 * (c - b);
        trace!("brent iteration {iteration}: x = {b}, f = {fb}, half-width = {half_width}");
        if half_width.abs() <= tol || fb == 0.0 {
            return Ok(Root {
                x: b,
                residual: fb,
                iterations: iteration,
            });
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            // Inverse quadratic interpolation, or secant when only two points differ.
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * half_width * s, 1.0 - s)
            } else {
                let q0 = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * half_width * q0 * (q0 - r) - (b - a) * (r - 1.0)),
                    (q0 - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let bound = (3.0 * half_width * q - (tol * q).abs()).min((e * q).abs());
            if 2.0 * p < bound {
                e = d;
                d = p / q;
            } else {
                d = half_width;
                e = d;
            }
        } else {
            d = half_width;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else {
            tol.copysign(half_width)
        };
        fb = eval(b)?;
    }

    warn!(
        "brent exhausted {} iterations at x = {b} (f = {fb})",
        options.max_iterations
    );
    Err(EquilibriumError::NotConverged {
        method: "brent",
        iterations: options.max_iterations,
        residual: fb.abs(),
    })
}

/// Bracket a root around `seed`, then polish it with Brent's method.
pub fn find_root_near<F>(
    mut f: F,
    seed: f64,
    bracket: &BracketOptions,
    root: &RootOptions,
) -> Result<Root>
where
    F: FnMut(f64) -> Result<f64>,
{
    let Bracket { lower, upper } = bracket_around(&mut f, seed, bracket)?;
    brent(f, lower, upper, root)
}

/// A converged minimum of an `N`-dimensional function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minimum<const N: usize> {
    pub x: [f64; N],
    pub value: f64,
    pub iterations: usize,
}

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Nelder-Mead minimization of `f` starting at `start`.
///
/// `scale` gives the natural size of each coordinate; the initial simplex
/// steps and the `x` tolerance are measured relative to it. `f` may return
/// `+inf` for infeasible points; NaN is treated the same way.
pub fn nelder_mead<const N: usize, F>(
    mut f: F,
    start: [f64; N],
    scale: [f64; N],
    options: &SimplexOptions,
) -> Result<Minimum<N>>
where
    F: FnMut(&[f64; N]) -> f64,
{
    let mut eval = |x: &[f64; N]| -> f64 {
        let v = f(x);
        if v.is_nan() {
            f64::INFINITY
        } else {
            v
        }
    };

    let mut simplex: Vec<([f64; N], f64)> = Vec::with_capacity(N + 1);
    simplex.push((start, eval(&start)));
    for i in 0..N {
        let mut vertex = start;
        vertex[i] += options.initial_step * scale[i];
        let value = eval(&vertex);
        simplex.push((vertex, value));
    }

    let mut spread = f64::INFINITY;
    for iteration in 0..options.max_iterations {
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
        let best = simplex[0];
        let worst = simplex[N];

        spread = worst.1 - best.1;
        let size = simplex[1..]
            .iter()
            .flat_map(|(x, _)| (0..N).map(move |i| (x[i] - best.0[i]).abs() / scale[i]))
            .fold(0.0, f64::max);
        if best.1.is_finite() && spread <= options.f_tolerance && size <= options.x_tolerance {
            debug!("nelder-mead converged in {iteration} iterations at f = {}", best.1);
            return Ok(Minimum {
                x: best.0,
                value: best.1,
                iterations: iteration,
            });
        }

        let mut centroid = [0.0; N];
        for (x, _) in &simplex[..N] {
            for i in 0..N {
                centroid[i] += x[i] / N as f64;
            }
        }
        let towards = |coef: f64| -> [f64; N] {
            let mut p = [0.0; N];
            for i in 0..N {
                p[i] = centroid[i] + coef * (worst.0[i] - centroid[i]);
            }
            p
        };

        let reflected = towards(-REFLECTION);
        let f_reflected = eval(&reflected);

        if f_reflected < best.1 {
            let expanded = towards(-EXPANSION);
            let f_expanded = eval(&expanded);
            simplex[N] = if f_expanded < f_reflected {
                (expanded, f_expanded)
            } else {
                (reflected, f_reflected)
            };
            continue;
        }
        if f_reflected < simplex[N - 1].1 {
            simplex[N] = (reflected, f_reflected);
            continue;
        }

        let (contracted, accept) = if f_reflected < worst.1 {
            let outside = towards(-REFLECTION * CONTRACTION);
            let f_outside = eval(&outside);
            ((outside, f_outside), f_outside <= f_reflected)
        } else {
            let inside = towards(CONTRACTION);
            let f_inside = eval(&inside);
            ((inside, f_inside), f_inside < worst.1)
        };
        if accept {
            simplex[N] = contracted;
            continue;
        }

        for vertex in simplex.iter_mut().skip(1) {
            for i in 0..N {
                vertex.0[i] = best.0[i] + SHRINK * (vertex.0[i] - best.0[i]);
            }
            vertex.1 = eval(&vertex.0);
        }
    }

    warn!(
        "nelder-mead exhausted {} iterations (spread {spread:e})",
        options.max_iterations
    );
    Err(EquilibriumError::NotConverged {
        method: "nelder-mead",
        iterations: options.max_iterations,
        residual: spread,
    })
}
