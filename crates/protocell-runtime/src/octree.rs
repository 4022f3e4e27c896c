//! Octree point index.
//!
//! Points live in leaves only. A leaf that grows past `capacity` splits
//! into eight octants around its midpoint and hands every point down,
//! unless it is already at `max_depth`, in which case it just keeps
//! growing. Each node also tracks the tight box around the points below
//! it; queries prune on that box, so points outside the nominal root
//! region are still found.

use protocell_core::config::WorldConfig;
use protocell_core::spatial::SpatialIndex;
use protocell_core::types::{Bounds, CellId, Vec3};

#[derive(Debug, Clone)]
struct OctreeNode {
    region: Bounds,
    depth: usize,
    /// Tight box around every point stored at or below this node.
    extent: Option<Bounds>,
    points: Vec<(CellId, Vec3)>,
    children: Option<Box<[OctreeNode; 8]>>,
}

impl OctreeNode {
    fn new(region: Bounds, depth: usize) -> Self {
        Self {
            region,
            depth,
            extent: None,
            points: Vec::new(),
            children: None,
        }
    }

    fn octant(&self, p: &Vec3) -> usize {
        octant(&self.region.center(), p)
    }

    fn insert(&mut self, id: CellId, p: Vec3, capacity: usize, max_depth: usize) {
        match self.extent.as_mut() {
            Some(extent) => extent.include(&p),
            None => self.extent = Some(Bounds::point(p)),
        }

        let i = self.octant(&p);
        if let Some(children) = self.children.as_mut() {
            children[i].insert(id, p, capacity, max_depth);
            return;
        }

        self.points.push((id, p));
        if self.points.len() > capacity && self.depth < max_depth {
            self.split(capacity, max_depth);
        }
    }

    fn split(&mut self, capacity: usize, max_depth: usize) {
        let (min, mid, max) = (self.region.min, self.region.center(), self.region.max);
        let depth = self.depth + 1;
        let mut children: Box<[OctreeNode; 8]> = Box::new(std::array::from_fn(|i| {
            let (lx, hx) = if i & 1 == 0 { (min.x, mid.x) } else { (mid.x, max.x) };
            let (ly, hy) = if i & 2 == 0 { (min.y, mid.y) } else { (mid.y, max.y) };
            let (lz, hz) = if i & 4 == 0 { (min.z, mid.z) } else { (mid.z, max.z) };
            OctreeNode::new(Bounds::new(Vec3::new(lx, ly, lz), Vec3::new(hx, hy, hz)), depth)
        }));

        for (id, p) in self.points.drain(..) {
            children[octant(&mid, &p)].insert(id, p, capacity, max_depth);
        }
        self.children = Some(children);
    }

    fn visit(&self, center: &Vec3, radius_sq: f64, visitor: &mut dyn FnMut(CellId, Vec3)) {
        let Some(extent) = self.extent else {
            return;
        };
        if extent.distance_squared_to(center) > radius_sq {
            return;
        }
        for &(id, p) in &self.points {
            if p.distance_squared(center) <= radius_sq {
                visitor(id, p);
            }
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.visit(center, radius_sq, visitor);
            }
        }
    }

    fn depth_reached(&self) -> usize {
        match &self.children {
            Some(children) => children.iter().map(|c| c.depth_reached()).max().unwrap_or(self.depth),
            None => self.depth,
        }
    }

    fn leaves(&self) -> usize {
        match &self.children {
            Some(children) => children.iter().map(|c| c.leaves()).sum(),
            None => 1,
        }
    }
}

/// Octant index: bit 0 for x, bit 1 for y, bit 2 for z. Coordinates
/// equal to the midpoint go high.
fn octant(mid: &Vec3, p: &Vec3) -> usize {
    (p.x >= mid.x) as usize | ((p.y >= mid.y) as usize) << 1 | ((p.z >= mid.z) as usize) << 2
}

/// Octree over cell positions, rebuilt once per day tick.
#[derive(Debug, Clone)]
pub struct Octree {
    root: OctreeNode,
    capacity: usize,
    max_depth: usize,
    len: usize,
}

impl Octree {
    pub fn new(bounds: Bounds, capacity: usize, max_depth: usize) -> Self {
        Self {
            root: OctreeNode::new(bounds, 0),
            capacity: capacity.max(1),
            max_depth,
            len: 0,
        }
    }

    pub fn from_config(world: &WorldConfig) -> Self {
        Self::new(world.bounds, world.octree_capacity, world.octree_max_depth)
    }

    pub fn bounds(&self) -> Bounds {
        self.root.region
    }

    /// Deepest level any leaf sits at.
    pub fn depth(&self) -> usize {
        self.root.depth_reached()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaves()
    }
}

impl SpatialIndex for Octree {
    fn clear(&mut self) {
        self.root = OctreeNode::new(self.root.region, 0);
        self.len = 0;
    }

    fn insert(&mut self, id: CellId, position: Vec3) {
        self.root.insert(id, position, self.capacity, self.max_depth);
        self.len += 1;
    }

    fn visit_within(&self, center: Vec3, radius: f64, visitor: &mut dyn FnMut(CellId, Vec3)) {
        if radius < 0.0 || radius.is_nan() {
            return;
        }
        self.root.visit(&center, radius * radius, visitor);
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Octree {
        Octree::new(Bounds::centered(100.0, 100.0, 100.0), 4, 5)
    }

    #[test]
    fn empty_tree_finds_nothing() {
        let t = tree();
        assert!(t.is_empty());
        assert!(t.query(Vec3::ZERO, 1000.0, None).is_empty());
    }

    #[test]
    fn query_is_inclusive_and_excludes_self() {
        let mut t = tree();
        t.insert(CellId(1), Vec3::ZERO);
        t.insert(CellId(2), Vec3::new(10.0, 0.0, 0.0));
        t.insert(CellId(3), Vec3::new(10.5, 0.0, 0.0));

        let mut found = t.query(Vec3::ZERO, 10.0, Some(CellId(1)));
        found.sort();
        assert_eq!(found, vec![CellId(2)]);

        let mut all = t.query(Vec3::ZERO, 10.0, None);
        all.sort();
        assert_eq!(all, vec![CellId(1), CellId(2)]);
    }

    #[test]
    fn splits_past_capacity() {
        let mut t = tree();
        for i in 0..5 {
            t.insert(CellId(i), Vec3::new(i as f64 * 30.0 - 60.0, 0.0, 0.0));
        }
        assert_eq!(t.len(), 5);
        assert!(t.depth() >= 1);
        assert!(t.leaf_count() >= 8);
    }

    #[test]
    fn coincident_points_stop_at_max_depth() {
        let mut t = tree();
        for i in 0..100 {
            t.insert(CellId(i), Vec3::new(1.0, 1.0, 1.0));
        }
        assert_eq!(t.depth(), 5);
        assert_eq!(t.query(Vec3::new(1.0, 1.0, 1.0), 0.0, None).len(), 100);
    }

    #[test]
    fn midpoint_ties_route_high() {
        let t = OctreeNode::new(Bounds::centered(10.0, 10.0, 10.0), 0);
        assert_eq!(t.octant(&Vec3::ZERO), 7);
        assert_eq!(t.octant(&Vec3::new(-0.1, 0.0, -0.1)), 2);
    }

    #[test]
    fn points_outside_root_region_are_found() {
        let mut t = tree();
        for i in 0..20 {
            t.insert(CellId(i), Vec3::new(150.0 + i as f64, 0.0, 0.0));
        }
        assert_eq!(t.query(Vec3::new(160.0, 0.0, 0.0), 3.0, None).len(), 7);
    }

    #[test]
    fn clear_resets() {
        let mut t = tree();
        t.rebuild((0..50).map(|i| (CellId(i), Vec3::new(i as f64, 0.0, 0.0))));
        assert_eq!(t.len(), 50);
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.leaf_count(), 1);
        assert!(t.query(Vec3::ZERO, 500.0, None).is_empty());
    }
}
