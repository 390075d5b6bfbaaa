use super::history::History;
use super::kernels::{axpy, dot};

/// Computes the search direction `d = -H·g` by the two-loop recursion.
///
/// `H` is the implicit inverse Hessian built from the pairs in `history`
/// on top of the diagonal `diag`. With an empty history this reduces to
/// `d = -diag ⊙ g`. `alpha` is scratch space reused across calls.
pub(crate) fn direction(
    history: &History,
    g: &[f64],
    diag: &[f64],
    alpha: &mut Vec<f64>,
    d: &mut [f64],
) {
    let n = g.len();
    d.copy_from_slice(g);

    alpha.clear();
    for pair in history.newest_first() {
        let a = pair.rho * dot(n, &pair.s, &*d);
        axpy(n, -a, &pair.y, &mut *d);
        alpha.push(a);
    }

    for (q, h) in d.iter_mut().zip(diag) {
        *q *= h;
    }

    for (pair, a) in history.oldest_first().zip(alpha.iter().rev()) {
        let beta = pair.rho * dot(n, &pair.y, &*d);
        axpy(n, a - beta, &pair.s, &mut *d);
    }

    for q in d.iter_mut() {
        *q = -*q;
    }
}
