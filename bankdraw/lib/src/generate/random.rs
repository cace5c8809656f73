use rand::Rng;

use crate::{Bank, Dims, Rule, Usage};

use super::{reserved_len, Config, Generation, Outcome};

/// Generate a sequence by repeatedly drawing values from `bank` uniformly at random.
///
/// For every position, up to [`Config::draw_limit`] values are drawn.  The first one which both
/// has some usage left and is accepted by `rule` is appended to the sequence.  Draws are made
/// from _every_ value in the bank, including ones which have been used up (these are simply
/// rejected), so draws are wasted more often as the bank runs out.
///
/// If every draw for some position is rejected, generation stops and the values generated so far
/// are returned with [`Outcome::Exhausted`].  Matrices are filled row-major, so the last row of a
/// partial matrix may be short.
pub fn generate_random(
    bank: &Bank,
    dims: Dims,
    rule: Option<&dyn Rule>,
    config: &Config,
    rng: &mut impl Rng,
) -> Generation {
    let total = dims.total();
    let row_size = dims.row_size();
    log::debug!(
        "Drawing {} values from a bank of {} distinct values",
        total,
        bank.len()
    );

    let mut usage = Usage::new(bank);
    let mut built = Vec::with_capacity(reserved_len(bank, total));
    let mut outcome = Outcome::Complete;
    for position in 0..total {
        match draw(bank, &usage, &built, rule, row_size, config.draw_limit, rng) {
            Some(idx) => {
                usage.push_at(idx);
                built.push(bank.value_at(idx));
            }
            None => {
                log::warn!(
                    "No value accepted for position {} after {} draws; stopping with {} of {} values",
                    position,
                    config.draw_limit,
                    built.len(),
                    total
                );
                outcome = Outcome::Exhausted {
                    position,
                    draws: config.draw_limit,
                };
                break;
            }
        }
    }

    Generation {
        values: dims.shape(built),
        outcome,
    }
}

/// Draw up to `draw_limit` values from `bank`, returning the index of the first value which is
/// available and accepted by `rule`.
fn draw(
    bank: &Bank,
    usage: &Usage,
    built: &[i64],
    rule: Option<&dyn Rule>,
    row_size: Option<usize>,
    draw_limit: usize,
    rng: &mut impl Rng,
) -> Option<usize> {
    if bank.is_empty() {
        return None; // Nothing can ever be drawn
    }
    (0..draw_limit)
        .map(|_| rng.gen_range(0..bank.len()))
        .find(|&idx| {
            usage.is_available_at(idx)
                && rule.map_or(true, |r| r.accept(bank.value_at(idx), built, row_size))
        })
}
