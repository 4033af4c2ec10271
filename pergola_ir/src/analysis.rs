use crate::{Error, Result};

/// Replaces every `None` entry with the value of the nearest known
/// neighbor, in place.
///
/// # Remarks
/// Analysis passes build sparse annotation arrays (one entry per graph
/// node, filled in as properties get resolved) and then flood the known
/// entries across the gaps. Each missing entry copies the nearest known
/// one; when a missing entry sits exactly between two known entries, the
/// earlier one wins. Runs before the first known entry or after the last
/// copy that single anchor entirely.
///
/// Fails with [`Error::AllValuesMissing`] when the slice contains no known
/// entry to propagate.
pub fn flood_replace_missing<T: Clone>(values: &mut [Option<T>]) -> Result<()> {
    let known = values
        .iter()
        .enumerate()
        .filter_map(|(i, x)| x.is_some().then_some(i))
        .collect::<Vec<_>>();

    if known.is_empty() {
        return Err(Error::AllValuesMissing);
    }

    for i in 0..values.len() {
        if values[i].is_some() {
            continue;
        }

        // The first known index after i; the one before it (if any) is the
        // nearest known index before i.
        let after = known.partition_point(|&k| k < i);

        let before = after.checked_sub(1).map(|x| known[x]);
        let after = known.get(after).copied();

        let source = match (before, after) {
            (Some(b), Some(a)) => {
                if i - b <= a - i {
                    b
                } else {
                    a
                }
            }
            (Some(b), None) => b,
            (None, Some(a)) => a,
            (None, None) => unreachable!(),
        };

        let filler = values[source].clone();
        values[i] = filler;
    }

    Ok(())
}
