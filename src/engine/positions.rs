use crate::domain::{PlayerAtTable, SeatIndex, Table};

/// Следующее место по кругу после `start`, где сидит игрок, подходящий под `pred`.
/// Сам `start` проверяется последним.
pub fn next_seat_from<F>(table: &Table, start: SeatIndex, pred: F) -> Option<SeatIndex>
where
    F: Fn(&PlayerAtTable) -> bool,
{
    let max = table.max_seats() as usize;
    if max == 0 {
        return None;
    }

    (1..=max)
        .map(|i| (start as usize + i) % max)
        .find(|&idx| {
            table
                .seats
                .get(idx)
                .and_then(|s| s.as_ref())
                .is_some_and(&pred)
        })
        .map(|idx| idx as SeatIndex)
}

/// Все места с подходящими игроками, по кругу начиная с `start` (включительно).
pub fn seats_from<F>(table: &Table, start: SeatIndex, pred: F) -> Vec<SeatIndex>
where
    F: Fn(&PlayerAtTable) -> bool,
{
    let max = table.max_seats() as usize;
    (0..max)
        .map(|i| (start as usize + i) % max)
        .filter(|&idx| {
            table
                .seats
                .get(idx)
                .and_then(|s| s.as_ref())
                .is_some_and(&pred)
        })
        .map(|idx| idx as SeatIndex)
        .collect()
}

/// Следующая позиция дилера:
/// - если кнопки ещё не было - самое младшее подходящее место;
/// - иначе - следующее подходящее после текущей кнопки.
pub fn next_dealer<F>(table: &Table, ready: F) -> Option<SeatIndex>
where
    F: Fn(&PlayerAtTable) -> bool,
{
    match table.dealer_button {
        Some(button) => next_seat_from(table, button, ready),
        None => table.players().find(|p| ready(p)).map(|p| p.seat),
    }
}
