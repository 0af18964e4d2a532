//! Per-pixel depth store.
//!
//! Depth values are view-space Z coordinates. The camera looks down -Z, so
//! every visible surface has a negative Z that approaches 0 as it gets closer:
//! larger values are nearer.

/// Value of a cell nothing has been drawn into this frame. Smaller than any
/// reachable view-space depth.
pub const EMPTY_DEPTH: f64 = -1.0e9;

#[derive(Debug, Clone)]
pub struct DepthBuffer {
    data: Vec<f64>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![EMPTY_DEPTH; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset every cell to [`EMPTY_DEPTH`]. Called once per frame before any
    /// triangle is drawn.
    #[inline]
    pub fn clear(&mut self) {
        self.data.fill(EMPTY_DEPTH);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "depth read out of range");
        y as usize * self.width as usize + x as usize
    }

    /// Stored depth at `(x, y)`. Both coordinates must be in range.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.data[self.index(x, y)]
    }

    /// Whether nothing has been committed at `(x, y)` this frame.
    #[inline]
    pub fn is_empty(&self, x: u32, y: u32) -> bool {
        self.get(x, y) <= EMPTY_DEPTH
    }

    /// Depth test and commit.
    ///
    /// Stores `z` and returns `true` when the cell is empty or `z` is strictly
    /// nearer (greater) than the stored value. Otherwise the cell is left
    /// alone and `false` is returned. Non-finite depths never pass.
    #[inline]
    pub fn update(&mut self, x: u32, y: u32, z: f64) -> bool {
        if !z.is_finite() {
            return false;
        }
        let idx = self.index(x, y);
        let stored = self.data[idx];
        if stored <= EMPTY_DEPTH || z > stored {
            self.data[idx] = z;
            true
        } else {
            false
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Number of cells that hold a committed depth.
    pub fn filled(&self) -> usize {
        self.data.iter().filter(|&&z| z > EMPTY_DEPTH).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let depth = DepthBuffer::new(4, 3);
        assert_eq!(depth.as_slice().len(), 12);
        assert!(depth.is_empty(3, 2));
        assert_eq!(depth.filled(), 0);
    }

    #[test]
    fn update_only_moves_nearer() {
        let mut depth = DepthBuffer::new(1, 1);
        let results: Vec<bool> = [5.0, 3.0, 8.0, 1.0]
            .iter()
            .map(|&z| depth.update(0, 0, z))
            .collect();
        assert_eq!(results, vec![true, false, true, false]);
        assert_eq!(depth.get(0, 0), 8.0);
    }

    #[test]
    fn equal_depth_does_not_pass() {
        let mut depth = DepthBuffer::new(1, 1);
        assert!(depth.update(0, 0, -600.0));
        assert!(!depth.update(0, 0, -600.0));
    }

    #[test]
    fn non_finite_depth_is_rejected() {
        let mut depth = DepthBuffer::new(1, 1);
        assert!(!depth.update(0, 0, f64::NAN));
        assert!(!depth.update(0, 0, f64::INFINITY));
        assert!(depth.is_empty(0, 0));
    }

    #[test]
    fn clear_resets_to_sentinel() {
        let mut depth = DepthBuffer::new(2, 2);
        depth.update(1, 1, -10.0);
        assert_eq!(depth.filled(), 1);
        depth.clear();
        assert_eq!(depth.get(1, 1), EMPTY_DEPTH);
        assert!(depth.update(1, 1, -900.0));
    }
}
