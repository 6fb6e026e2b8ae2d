use glam::Vec2;

/// Screen-space axis-aligned box, in padded grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenAabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl ScreenAabb {
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    pub fn intersects_circle(&self, circle: &ScreenCircle) -> bool {
        let closest = circle.center.clamp(self.min, self.max);
        closest.distance_squared(circle.center) < circle.radius * circle.radius
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenCircle {
    pub center: Vec2,
    pub radius: f32,
}

impl ScreenCircle {
    pub fn intersects(&self, other: &Self) -> bool {
        let r = self.radius + other.radius;
        self.center.distance_squared(other.center) < r * r
    }
}

/// Identity attached to every indexed geometry, echoed back to hit queries
/// and used for the collision-group check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridEntry {
    pub bucket_instance_id: u32,
    pub feature_index: u32,
    pub collision_group_id: u16,
}

impl GridEntry {
    fn matches(&self, filter: Option<u16>) -> bool {
        filter.is_none_or(|group| self.collision_group_id == group)
    }
}

const CELL_SIZE: f32 = 64.0;

/// Uniform screen-space grid over the padded viewport. Boxes and circles
/// are bucketed into every cell they touch; hit tests early-out on the
/// first obstruction, so entries spanning several cells need no dedup.
#[derive(Debug)]
pub struct GridIndex {
    min: Vec2,
    cols: usize,
    rows: usize,
    boxes: Vec<(ScreenAabb, GridEntry)>,
    circles: Vec<(ScreenCircle, GridEntry)>,
    box_cells: Vec<Vec<u32>>,
    circle_cells: Vec<Vec<u32>>,
}

impl GridIndex {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        let cols = (((max.x - min.x) / CELL_SIZE).ceil() as usize).max(1);
        let rows = (((max.y - min.y) / CELL_SIZE).ceil() as usize).max(1);
        Self {
            min,
            cols,
            rows,
            boxes: Vec::new(),
            circles: Vec::new(),
            box_cells: vec![Vec::new(); cols * rows],
            circle_cells: vec![Vec::new(); cols * rows],
        }
    }

    fn cell_span(&self, min: Vec2, max: Vec2) -> (usize, usize, usize, usize) {
        let clamp_col = |x: f32| {
            (((x - self.min.x) / CELL_SIZE) as isize).clamp(0, self.cols as isize - 1) as usize
        };
        let clamp_row = |y: f32| {
            (((y - self.min.y) / CELL_SIZE) as isize).clamp(0, self.rows as isize - 1) as usize
        };
        (
            clamp_col(min.x),
            clamp_col(max.x),
            clamp_row(min.y),
            clamp_row(max.y),
        )
    }

    pub fn insert_box(&mut self, aabb: ScreenAabb, entry: GridEntry) {
        let index = self.boxes.len() as u32;
        self.boxes.push((aabb, entry));
        let (c1, c2, r1, r2) = self.cell_span(aabb.min, aabb.max);
        for row in r1..=r2 {
            for col in c1..=c2 {
                self.box_cells[row * self.cols + col].push(index);
            }
        }
    }

    pub fn insert_circle(&mut self, circle: ScreenCircle, entry: GridEntry) {
        let index = self.circles.len() as u32;
        self.circles.push((circle, entry));
        let r = Vec2::splat(circle.radius);
        let (c1, c2, r1, r2) = self.cell_span(circle.center - r, circle.center + r);
        for row in r1..=r2 {
            for col in c1..=c2 {
                self.circle_cells[row * self.cols + col].push(index);
            }
        }
    }

    /// True when any indexed geometry matching `filter` overlaps `aabb`.
    pub fn hit_test_box(&self, aabb: &ScreenAabb, filter: Option<u16>) -> bool {
        let (c1, c2, r1, r2) = self.cell_span(aabb.min, aabb.max);
        for row in r1..=r2 {
            for col in c1..=c2 {
                let cell = row * self.cols + col;
                for &i in &self.box_cells[cell] {
                    let (other, entry) = &self.boxes[i as usize];
                    if entry.matches(filter) && aabb.intersects(other) {
                        return true;
                    }
                }
                for &i in &self.circle_cells[cell] {
                    let (circle, entry) = &self.circles[i as usize];
                    if entry.matches(filter) && aabb.intersects_circle(circle) {
                        return true;
                    }
                }
            }
        }
        false
    }

    pub fn hit_test_circle(&self, circle: &ScreenCircle, filter: Option<u16>) -> bool {
        let r = Vec2::splat(circle.radius);
        let (c1, c2, r1, r2) = self.cell_span(circle.center - r, circle.center + r);
        for row in r1..=r2 {
            for col in c1..=c2 {
                let cell = row * self.cols + col;
                for &i in &self.box_cells[cell] {
                    let (aabb, entry) = &self.boxes[i as usize];
                    if entry.matches(filter) && aabb.intersects_circle(circle) {
                        return true;
                    }
                }
                for &i in &self.circle_cells[cell] {
                    let (other, entry) = &self.circles[i as usize];
                    if entry.matches(filter) && circle.intersects(other) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn entry(group: u16) -> GridEntry {
        GridEntry {
            bucket_instance_id: 1,
            feature_index: 0,
            collision_group_id: group,
        }
    }

    fn aabb(x1: f32, y1: f32, x2: f32, y2: f32) -> ScreenAabb {
        ScreenAabb {
            min: Vec2::new(x1, y1),
            max: Vec2::new(x2, y2),
        }
    }

    #[test]
    fn boxes_hit_only_matching_groups() {
        let mut grid = GridIndex::new(Vec2::ZERO, Vec2::new(512.0, 512.0));
        grid.insert_box(aabb(10.0, 10.0, 30.0, 30.0), entry(7));

        let probe = aabb(20.0, 20.0, 40.0, 40.0);
        assert!(grid.hit_test_box(&probe, None), "no filter matches all");
        assert!(grid.hit_test_box(&probe, Some(7)));
        assert!(!grid.hit_test_box(&probe, Some(8)), "other group is invisible");
        assert!(!grid.hit_test_box(&aabb(100.0, 100.0, 120.0, 120.0), None));
    }

    #[test]
    fn circles_collide_with_boxes_and_circles() {
        let mut grid = GridIndex::new(Vec2::ZERO, Vec2::new(512.0, 512.0));
        grid.insert_circle(
            ScreenCircle {
                center: Vec2::new(100.0, 100.0),
                radius: 10.0,
            },
            entry(0),
        );

        assert!(grid.hit_test_box(&aabb(105.0, 95.0, 130.0, 110.0), None));
        assert!(grid.hit_test_circle(
            &ScreenCircle {
                center: Vec2::new(115.0, 100.0),
                radius: 6.0
            },
            None
        ));
        assert!(!grid.hit_test_circle(
            &ScreenCircle {
                center: Vec2::new(130.0, 100.0),
                radius: 6.0
            },
            None
        ));
    }

    #[test]
    fn grid_agrees_with_brute_force() {
        let mut rng = rand::rng();
        let mut grid = GridIndex::new(Vec2::ZERO, Vec2::new(712.0, 712.0));
        let mut inserted: Vec<ScreenAabb> = Vec::new();

        for _ in 0..200 {
            let x = rng.random_range(0.0..700.0);
            let y = rng.random_range(0.0..700.0);
            let b = aabb(x, y, x + rng.random_range(1.0..40.0), y + rng.random_range(1.0..40.0));
            grid.insert_box(b, entry(0));
            inserted.push(b);
        }

        for _ in 0..200 {
            let x = rng.random_range(-20.0..720.0);
            let y = rng.random_range(-20.0..720.0);
            let probe = aabb(x, y, x + 25.0, y + 25.0);
            let brute = inserted.iter().any(|b| b.intersects(&probe));
            assert_eq!(
                grid.hit_test_box(&probe, None),
                brute,
                "grid and brute force disagree for {probe:?}"
            );
        }
    }
}
