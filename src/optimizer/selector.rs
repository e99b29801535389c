use tracing::warn;

/// One candidate for the 0/1 selection: a whole line's price and value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub price: u64,
    pub value: f64,
}

impl Candidate {
    pub fn new(price: u64, value: f64) -> Self {
        Self { price, value }
    }
}

/// Decision table of a filled DP, one row per candidate.
///
/// `take[i][b]` is set when `dp[i][b] != dp[i-1][b]`, i.e. when taking item `i`
/// is strictly better than skipping it at budget `b`.
struct DecisionTable {
    width: usize,
    take: Vec<bool>,
}

impl DecisionTable {
    fn new(rows: usize, width: usize) -> Option<Self> {
        let cells = rows.checked_mul(width)?;
        Some(Self {
            width,
            take: vec![false; cells],
        })
    }

    #[inline]
    fn set(&mut self, row: usize, b: usize) {
        self.take[row * self.width + b] = true;
    }

    #[inline]
    fn get(&self, row: usize, b: usize) -> bool {
        self.take[row * self.width + b]
    }
}

/// Solve the 0/1 budget-constrained maximization.
///
/// Returns the indices of the chosen candidates in ascending order. The best
/// value is found bottom-up with
/// `dp[i][b] = max(dp[i-1][b], dp[i-1][b - price_i] + value_i)`, keeping only
/// two value rows plus the decision flags needed for reconstruction.
///
/// Ties keep the item out: when taking item `i` only matches skipping it, the
/// backward walk moves on and an earlier candidate is used instead.
pub fn select(candidates: &[Candidate], budget: usize) -> Vec<usize> {
    let n = candidates.len();
    if n == 0 || budget == 0 {
        return Vec::new();
    }

    // Columns past the summed price all hold the same answer.
    let total_price = candidates
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.price));
    let budget = budget.min(usize::try_from(total_price).unwrap_or(usize::MAX));

    let Some(width) = budget.checked_add(1) else {
        warn!(budget, "selection table width overflows");
        return Vec::new();
    };
    let Some(mut table) = DecisionTable::new(n, width) else {
        warn!(rows = n, width, "selection table size overflows");
        return Vec::new();
    };
    let mut prev = vec![0.0_f64; width];
    let mut cur = vec![0.0_f64; width];

    for (i, candidate) in candidates.iter().enumerate() {
        let price = usize::try_from(candidate.price).unwrap_or(usize::MAX);
        for b in 0..width {
            let without = prev[b];
            cur[b] = without;
            if price <= b {
                let with = prev[b - price] + candidate.value;
                if with > without {
                    cur[b] = with;
                    table.set(i, b);
                }
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    let mut chosen = Vec::new();
    let mut b = budget;
    for i in (0..n).rev() {
        if table.get(i, b) {
            chosen.push(i);
            // A set flag implies price <= b.
            b -= candidates[i].price as usize;
        }
    }

    chosen.reverse();
    chosen
}

/// Best objective value reachable within the budget (sum of chosen values).
pub fn best_value(candidates: &[Candidate], budget: usize) -> f64 {
    select(candidates, budget)
        .into_iter()
        .fold(0.0, |acc, i| acc + candidates[i].value)
}
