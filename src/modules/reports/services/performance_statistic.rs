use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::core::money;
use crate::modules::reports::models::{AmountSummary, PerformanceItem};
use crate::modules::reports::repositories::{OrderRecord, TargetRecord};

struct AgentTotals {
    sales_id: i64,
    sales_name: String,
    revenue: Decimal,
}

/// Group one month of orders by sales agent, pair each group with the
/// agent's target total, and rank the agents by target attainment.
///
/// The underperform comparison and the sort both use amounts rounded to
/// the reported two-decimal scale, so what the filter and the ordering say
/// always matches the rendered values.
pub fn build(
    orders: &[OrderRecord],
    targets: &[TargetRecord],
    is_underperform: Option<bool>,
) -> Vec<PerformanceItem> {
    // Revenue per agent, grouped in first-seen order for stable ties.
    let mut agents: Vec<AgentTotals> = Vec::new();
    let mut positions: HashMap<i64, usize> = HashMap::new();

    for order in orders {
        let position = *positions.entry(order.sales_id).or_insert_with(|| {
            agents.push(AgentTotals {
                sales_id: order.sales_id,
                sales_name: order.sales_name.clone(),
                revenue: Decimal::ZERO,
            });
            agents.len() - 1
        });
        agents[position].revenue += order.revenue();
    }

    let mut target_totals: HashMap<i64, Decimal> = HashMap::new();
    for target in targets {
        *target_totals.entry(target.sales_id).or_default() += target.amount;
    }

    let mut ranked: Vec<(Decimal, PerformanceItem)> = agents
        .iter()
        .filter_map(|agent| {
            let target_total = target_totals
                .get(&agent.sales_id)
                .copied()
                .unwrap_or(Decimal::ZERO);

            let revenue = money::to_reported_scale(agent.revenue);
            let target = money::to_reported_scale(target_total);

            let keep = match is_underperform {
                None => true,
                Some(true) => revenue < target,
                Some(false) => revenue >= target,
            };
            if !keep {
                return None;
            }

            // Division by a zero target is defined as zero, never an error.
            let percentage = if target_total.is_zero() {
                Decimal::ZERO
            } else {
                money::to_reported_scale(
                    agent.revenue / target_total * Decimal::ONE_HUNDRED,
                )
            };

            let item = PerformanceItem {
                sales: agent.sales_name.clone(),
                revenue: AmountSummary::from_decimal(revenue),
                target: AmountSummary::from_decimal(target),
                percentage: money::format_amount(percentage),
            };

            Some((percentage, item))
        })
        .collect();

    // Vec::sort_by is stable: equal percentages keep first-seen order.
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    ranked.into_iter().map(|(_, item)| item).collect()
}
