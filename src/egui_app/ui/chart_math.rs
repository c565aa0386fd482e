/// Likelihoods are percentages; the vertical axis is fixed to this range.
pub(crate) const VALUE_RANGE: f32 = 100.0;

/// Screen positions of `values` spread evenly across `rect`, 0 at the bottom.
pub(crate) fn point_positions(rect: egui::Rect, values: &[f64]) -> Vec<egui::Pos2> {
    let step = if values.len() > 1 {
        rect.width() / (values.len() - 1) as f32
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let x = if values.len() > 1 {
                rect.left() + step * index as f32
            } else {
                rect.center().x
            };
            let ratio = (*value as f32 / VALUE_RANGE).clamp(0.0, 1.0);
            let y = rect.bottom() - ratio * rect.height();
            egui::pos2(x, y)
        })
        .collect()
}

/// Index of the point closest to `pointer` within `radius`, if any.
pub(crate) fn hit_point(points: &[egui::Pos2], pointer: egui::Pos2, radius: f32) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .map(|(index, point)| (index, point.distance(pointer)))
        .filter(|(_, distance)| *distance <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}
