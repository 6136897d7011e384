use uuid::Uuid;

use crate::models::batch::{Batch, OptimizeResult};
use crate::models::order::{Order, OrderStatus};
use crate::models::zone::Zone;

/// Minimum number of placed orders a zone needs before it gets a fleet.
pub const BATCH_THRESHOLD: usize = 5;

/// Groups placed orders by zone and hands every zone at or above the
/// threshold to the next fleet. Zones are visited in the order they first
/// appear in `orders`, so labels are stable for a stable input order.
pub fn optimize(orders: &[Order]) -> OptimizeResult {
    let mut groups: Vec<(Zone, Vec<Uuid>)> = Vec::new();

    for order in orders.iter().filter(|order| order.status == OrderStatus::Placed) {
        match groups.iter_mut().find(|(zone, _)| *zone == order.zone) {
            Some((_, ids)) => ids.push(order.id),
            None => groups.push((order.zone, vec![order.id])),
        }
    }

    let mut result = OptimizeResult::default();

    for (zone, order_ids) in groups {
        if order_ids.len() < BATCH_THRESHOLD {
            result.unbatched_count += order_ids.len();
            continue;
        }

        result.batches.push(Batch {
            zone,
            order_count: order_ids.len(),
            assignment: fleet_label(result.batches.len()),
            order_ids,
        });
    }

    result
}

/// "Fleet A" .. "Fleet Z", then "Fleet AA", "Fleet AB", ...
pub fn fleet_label(index: usize) -> String {
    let mut remaining = index + 1;
    let mut letters = Vec::new();

    while remaining > 0 {
        remaining -= 1;
        letters.push(char::from(b'A' + (remaining % 26) as u8));
        remaining /= 26;
    }

    let suffix: String = letters.into_iter().rev().collect();
    format!("Fleet {suffix}")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{fleet_label, optimize, BATCH_THRESHOLD};
    use crate::models::order::{Order, OrderStatus};
    use crate::models::zone::Zone;

    fn order(zone: Zone, status: OrderStatus) -> Order {
        let now = Utc::now();
        Order {
            id: Uuid::new_v4(),
            customer: "test-customer".to_string(),
            dispensary: "test-dispensary".to_string(),
            zone,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn placed(zone: Zone, count: usize) -> Vec<Order> {
        (0..count).map(|_| order(zone, OrderStatus::Placed)).collect()
    }

    #[test]
    fn empty_input_yields_nothing() {
        let result = optimize(&[]);
        assert!(result.batches.is_empty());
        assert_eq!(result.unbatched_count, 0);
    }

    #[test]
    fn brooklyn_batched_and_queens_left_over() {
        let mut orders = placed(Zone::Brooklyn, 6);
        orders.extend(placed(Zone::Queens, 3));

        let result = optimize(&orders);

        assert_eq!(result.batches.len(), 1);
        let batch = &result.batches[0];
        assert_eq!(batch.zone, Zone::Brooklyn);
        assert_eq!(batch.order_count, 6);
        assert_eq!(batch.assignment, "Fleet A");
        assert_eq!(result.unbatched_count, 3);
    }

    #[test]
    fn exactly_threshold_forms_one_batch() {
        let orders = placed(Zone::Bronx, BATCH_THRESHOLD);
        let result = optimize(&orders);

        assert_eq!(result.batches.len(), 1);
        assert_eq!(result.batches[0].order_count, BATCH_THRESHOLD);
        assert_eq!(result.unbatched_count, 0);
    }

    #[test]
    fn non_placed_orders_are_ignored_entirely() {
        let mut orders = placed(Zone::Manhattan, 4);
        orders.push(order(Zone::Manhattan, OrderStatus::Dispatched));
        orders.push(order(Zone::Manhattan, OrderStatus::Delivered));
        orders.push(order(Zone::Queens, OrderStatus::Cancelled));

        let result = optimize(&orders);

        assert!(result.batches.is_empty());
        assert_eq!(result.unbatched_count, 4);
    }

    #[test]
    fn batch_keeps_zone_order_ids_in_input_order() {
        let mut orders = Vec::new();
        for _ in 0..5 {
            orders.push(order(Zone::Queens, OrderStatus::Placed));
            orders.push(order(Zone::Bronx, OrderStatus::Placed));
        }
        let expected_queens: Vec<Uuid> = orders
            .iter()
            .filter(|o| o.zone == Zone::Queens)
            .map(|o| o.id)
            .collect();

        let result = optimize(&orders);

        assert_eq!(result.batches[0].zone, Zone::Queens);
        assert_eq!(result.batches[0].order_ids, expected_queens);
    }

    #[test]
    fn labels_follow_first_seen_zone_order() {
        let mut orders = placed(Zone::Queens, 2);
        orders.extend(placed(Zone::StatenIsland, 5));
        orders.extend(placed(Zone::Queens, 3));
        orders.extend(placed(Zone::Manhattan, 7));

        let result = optimize(&orders);

        let labelled: Vec<(Zone, &str)> = result
            .batches
            .iter()
            .map(|b| (b.zone, b.assignment.as_str()))
            .collect();
        assert_eq!(
            labelled,
            vec![
                (Zone::Queens, "Fleet A"),
                (Zone::StatenIsland, "Fleet B"),
                (Zone::Manhattan, "Fleet C"),
            ]
        );
    }

    #[test]
    fn small_zones_do_not_consume_labels() {
        let mut orders = placed(Zone::Bronx, 2);
        orders.extend(placed(Zone::Brooklyn, 5));

        let result = optimize(&orders);

        assert_eq!(result.batches[0].assignment, "Fleet A");
        assert_eq!(result.unbatched_count, 2);
    }

    #[test]
    fn placed_orders_are_conserved() {
        let mut orders = placed(Zone::Brooklyn, 8);
        orders.extend(placed(Zone::Queens, 4));
        orders.extend(placed(Zone::Bronx, 5));
        orders.push(order(Zone::Bronx, OrderStatus::Dispatched));

        let result = optimize(&orders);

        let batched: usize = result.batches.iter().map(|b| b.order_count).sum();
        assert_eq!(batched + result.unbatched_count, 17);
        for batch in &result.batches {
            assert_eq!(batch.order_ids.len(), batch.order_count);
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let mut orders = placed(Zone::Brooklyn, 6);
        orders.extend(placed(Zone::Manhattan, 5));
        let snapshot = orders.clone();

        let first = optimize(&orders);
        let second = optimize(&orders);

        assert_eq!(first, second);
        assert_eq!(orders, snapshot);
    }

    #[test]
    fn fleet_labels_roll_over_past_z() {
        assert_eq!(fleet_label(0), "Fleet A");
        assert_eq!(fleet_label(1), "Fleet B");
        assert_eq!(fleet_label(25), "Fleet Z");
        assert_eq!(fleet_label(26), "Fleet AA");
        assert_eq!(fleet_label(27), "Fleet AB");
        assert_eq!(fleet_label(51), "Fleet AZ");
        assert_eq!(fleet_label(52), "Fleet BA");
    }
}
