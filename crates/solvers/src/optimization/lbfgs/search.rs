use descent_core::{MinimizationProblem, Model, Observer};

use crate::optimization::{Evaluation, evaluate};

use super::{
    Action, Config, Diagonal, Error, Event, Lbfgs, Reply, Request, Solution, solution::Status,
};

/// Drives [`Lbfgs`] by evaluating the problem at each requested point.
pub(super) fn search<M, P, Obs>(
    model: &M,
    problem: &P,
    x0: &[f64],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: MinimizationProblem<Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    config.validate()?;
    let mut accepted = evaluate(model, problem, x0)?;

    let diagonal = match problem
        .diagonal(&accepted.snapshot.input, &accepted.snapshot.output)
        .map_err(Error::problem)?
    {
        Some(diag) => Diagonal::Supplied(diag),
        None => Diagonal::Scaled,
    };

    let mut lbfgs = Lbfgs::new(x0.to_vec(), config, diagonal)?;
    let mut request = lbfgs.advance(Reply::Evaluation {
        f: accepted.objective,
        g: &accepted.gradient,
    })?;

    if request != Request::Converged && config.max_iters == 0 {
        return Ok(into_solution(accepted, &lbfgs, Status::MaxIters));
    }

    loop {
        request = match request {
            Request::Converged => return Ok(into_solution(accepted, &lbfgs, Status::Converged)),
            Request::Diagonal => {
                let supplied = problem
                    .diagonal(&accepted.snapshot.input, &accepted.snapshot.output)
                    .map_err(Error::problem)?;
                // Keep the previous diagonal when the problem has no update.
                let diag = supplied.unwrap_or_else(|| lbfgs.diagonal().to_vec());
                lbfgs.advance(Reply::Diagonal(&diag))?
            }
            Request::Evaluate => {
                let eval = evaluate(model, problem, lbfgs.x())?;
                let iteration = lbfgs.progress().iteration;
                let next = lbfgs.advance(Reply::Evaluation {
                    f: eval.objective,
                    g: &eval.gradient,
                })?;
                if lbfgs.progress().iteration == iteration {
                    next
                } else {
                    accepted = eval;
                    let event = Event {
                        progress: lbfgs.progress(),
                        x: &accepted.x,
                        gradient: &accepted.gradient,
                        snapshot: &accepted.snapshot,
                    };
                    let action = observer.observe(&event);

                    if next == Request::Converged {
                        next
                    } else if action == Some(Action::StopEarly) {
                        return Ok(into_solution(accepted, &lbfgs, Status::StoppedByObserver));
                    } else if lbfgs.progress().iteration >= config.max_iters {
                        return Ok(into_solution(accepted, &lbfgs, Status::MaxIters));
                    } else {
                        next
                    }
                }
            }
        };
    }
}

fn into_solution<I, O>(
    accepted: Evaluation<I, O>,
    lbfgs: &Lbfgs,
    status: Status,
) -> Solution<I, O> {
    let progress = lbfgs.progress();
    Solution {
        status,
        x: accepted.x,
        objective: accepted.objective,
        gradient_norm: progress.gradient_norm,
        snapshot: accepted.snapshot,
        iters: progress.iteration,
        evals: progress.evaluations,
    }
}
