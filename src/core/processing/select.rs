use crate::core::params::SelectionParams;
use crate::types::{RankedRegion, Rect, SizeCriterion};

/// Whether `rect` is large enough relative to a `width` x `height` image.
/// The boundary is inclusive.
pub fn passes_size_filter(rect: &Rect, width: u32, height: u32, params: &SelectionParams) -> bool {
    match params.criterion {
        SizeCriterion::Area => {
            let image_area = width as f64 * height as f64;
            rect.area() as f64 >= params.min_fraction * image_area
        }
        SizeCriterion::Width => rect.width as f64 >= params.min_fraction * width as f64,
    }
}

/// Keep regions in proposer order that pass the size filter, up to `number_regions`.
///
/// Ranks start at 1 and follow the order of `regions`; nothing is re-sorted.
pub fn select_regions(
    regions: &[Rect],
    width: u32,
    height: u32,
    params: &SelectionParams,
) -> Vec<RankedRegion> {
    regions
        .iter()
        .filter(|rect| passes_size_filter(rect, width, height, params))
        .take(params.number_regions)
        .enumerate()
        .map(|(i, rect)| RankedRegion {
            rank: i + 1,
            rect: *rect,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(n: usize, fraction: f64, criterion: SizeCriterion) -> SelectionParams {
        SelectionParams {
            number_regions: n,
            min_fraction: fraction,
            criterion,
        }
    }

    fn candidates() -> Vec<Rect> {
        vec![
            Rect::new(0, 0, 10, 10),   // tiny
            Rect::new(0, 0, 300, 120), // 36000, exactly 20% of 600x300
            Rect::new(10, 10, 500, 200),
            Rect::new(0, 0, 100, 100),
            Rect::new(50, 50, 400, 250),
            Rect::new(0, 0, 600, 300),
        ]
    }

    #[test]
    fn area_boundary_is_inclusive() {
        let sel = select_regions(&candidates(), 600, 300, &params(10, 0.2, SizeCriterion::Area));
        let kept: Vec<Rect> = sel.iter().map(|r| r.rect).collect();
        assert_eq!(
            kept,
            vec![
                Rect::new(0, 0, 300, 120),
                Rect::new(10, 10, 500, 200),
                Rect::new(50, 50, 400, 250),
                Rect::new(0, 0, 600, 300),
            ]
        );
        assert_eq!(sel.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn stops_at_cap() {
        let sel = select_regions(&candidates(), 600, 300, &params(2, 0.2, SizeCriterion::Area));
        assert_eq!(sel.len(), 2);
        assert_eq!(sel[1].rect, Rect::new(10, 10, 500, 200));
    }

    #[test]
    fn zero_cap_is_empty() {
        assert!(select_regions(&candidates(), 600, 300, &params(0, 0.0, SizeCriterion::Area)).is_empty());
    }

    #[test]
    fn zero_threshold_admits_everything() {
        let sel = select_regions(&candidates(), 600, 300, &params(100, 0.0, SizeCriterion::Area));
        assert_eq!(sel.len(), candidates().len());
    }

    #[test]
    fn width_criterion_ignores_height() {
        let regions = vec![Rect::new(0, 0, 120, 1), Rect::new(0, 0, 119, 300)];
        let sel = select_regions(&regions, 600, 300, &params(10, 0.2, SizeCriterion::Width));
        assert_eq!(sel.len(), 1);
        assert_eq!(sel[0].rect, Rect::new(0, 0, 120, 1));
    }
}
