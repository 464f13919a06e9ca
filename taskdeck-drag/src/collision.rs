//! Closest-corners collision detection

use crate::geometry::{corner_distance, Rect};
use crate::surface::TargetId;
use taskdeck_board::TaskId;
use tracing::trace;

/// The nearest drop target and how far away it is
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub target: TargetId,
    pub distance: f64,
}

/// Pick the target whose corners are closest to the dragged rectangle.
///
/// The dragged task's own card is never a candidate. On equal distance the target
/// registered first wins. With `max_distance`, anything farther away counts as no
/// target at all.
pub fn closest_corners(
    dragged: &Rect,
    targets: &[(TargetId, Rect)],
    skip_task: Option<&TaskId>,
    max_distance: Option<f64>,
) -> Option<Collision> {
    let mut best: Option<Collision> = None;

    for (target, rect) in targets {
        if let (TargetId::Task(task), Some(skip)) = (target, skip_task) {
            if task == skip {
                continue;
            }
        }

        let distance = corner_distance(dragged, rect);
        if distance.is_nan() {
            continue;
        }
        trace!(target = %target, distance, "collision candidate");

        if best.as_ref().map_or(true, |b| distance < b.distance) {
            best = Some(Collision {
                target: target.clone(),
                distance,
            });
        }
    }

    best.filter(|b| max_distance.map_or(true, |max| b.distance <= max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_board::ColumnId;

    fn column(id: &str) -> TargetId {
        TargetId::Column(ColumnId::from(id))
    }

    fn task(id: &str) -> TargetId {
        TargetId::Task(TaskId::from(id))
    }

    #[test]
    fn test_picks_nearest() {
        let targets = vec![
            (column("a"), Rect::new(0.0, 0.0, 100.0, 300.0)),
            (task("t1"), Rect::new(0.0, 40.0, 100.0, 30.0)),
            (task("t2"), Rect::new(0.0, 80.0, 100.0, 30.0)),
        ];
        let dragged = Rect::new(2.0, 78.0, 100.0, 30.0);

        let hit = closest_corners(&dragged, &targets, None, None).unwrap();
        assert_eq!(hit.target, task("t2"));
    }

    #[test]
    fn test_skips_own_card() {
        let targets = vec![
            (task("me"), Rect::new(0.0, 0.0, 10.0, 10.0)),
            (task("other"), Rect::new(0.0, 50.0, 10.0, 10.0)),
        ];
        let dragged = Rect::new(0.0, 0.0, 10.0, 10.0);

        let hit = closest_corners(&dragged, &targets, Some(&TaskId::from("me")), None).unwrap();
        assert_eq!(hit.target, task("other"));
    }

    #[test]
    fn test_tie_goes_to_first_registered() {
        let targets = vec![
            (column("left"), Rect::new(-10.0, 0.0, 10.0, 10.0)),
            (column("right"), Rect::new(10.0, 0.0, 10.0, 10.0)),
        ];
        let dragged = Rect::new(0.0, 0.0, 10.0, 10.0);

        let hit = closest_corners(&dragged, &targets, None, None).unwrap();
        assert_eq!(hit.target, column("left"));
    }

    #[test]
    fn test_max_distance_rejects_far_targets() {
        let targets = vec![(column("far"), Rect::new(500.0, 500.0, 10.0, 10.0))];
        let dragged = Rect::new(0.0, 0.0, 10.0, 10.0);

        assert!(closest_corners(&dragged, &targets, None, Some(100.0)).is_none());
        assert!(closest_corners(&dragged, &targets, None, None).is_some());
    }

    #[test]
    fn test_no_targets() {
        assert!(closest_corners(&Rect::default(), &[], None, None).is_none());
    }
}
