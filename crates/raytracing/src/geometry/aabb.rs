use super::vec3::Vec3;

/// Axis-aligned bounding box
/// Defined by 2 points; an empty box has `minimum > maximum` on every axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AABB {
    pub minimum: Vec3,
    pub maximum: Vec3
}

impl Default for AABB {
    fn default() -> Self {
        AABB::empty()
    }
}

impl AABB {
    pub fn new(minimum: Vec3, maximum: Vec3) -> AABB {
        AABB { minimum, maximum }
    }

    /// Box containing nothing; including anything into it yields that thing
    pub fn empty() -> AABB {
        AABB {
            minimum: Vec3::splat(f32::INFINITY),
            maximum: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.minimum.0 <= self.maximum.0
            && self.minimum.1 <= self.maximum.1
            && self.minimum.2 <= self.maximum.2
    }

    /// Returns a box which surrounds both a and b
    pub fn surrounding_box(a: AABB, b: AABB) -> AABB {
        AABB {
            minimum: Vec3::elementwise_min(a.minimum, b.minimum),
            maximum: Vec3::elementwise_max(a.maximum, b.maximum),
        }
    }

    pub fn include_point(&mut self, p: Vec3) {
        self.minimum = Vec3::elementwise_min(self.minimum, p);
        self.maximum = Vec3::elementwise_max(self.maximum, p);
    }

    /// Grows this box to contain `other`. Empty boxes contribute nothing.
    pub fn include(&mut self, other: &AABB) {
        if other.is_valid() {
            *self = AABB::surrounding_box(*self, *other);
        }
    }

    /// Size along one axis, 0 for an empty box
    pub fn extent(&self, axis: usize) -> f32 {
        if self.is_valid() {
            self.maximum.axis(axis) - self.minimum.axis(axis)
        } else {
            0.0
        }
    }

    pub fn extents(&self) -> Vec3 {
        Vec3(self.extent(0), self.extent(1), self.extent(2))
    }

    pub fn center(&self) -> Vec3 {
        if self.is_valid() {
            (self.minimum + self.maximum) * 0.5
        } else {
            Vec3::zero()
        }
    }

    /// Whether `other` lies inside this box when projected onto the XZ plane
    pub fn contains_footprint(&self, other: &AABB) -> bool {
        self.minimum.0 <= other.minimum.0
            && self.minimum.2 <= other.minimum.2
            && self.maximum.0 >= other.maximum.0
            && self.maximum.2 >= other.maximum.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_box_has_no_extent() {
        let aabb = AABB::default();
        assert!(!aabb.is_valid());
        assert_eq!(aabb.extent(0), 0.0);
        assert_eq!(aabb.center(), Vec3::zero());
    }

    #[test]
    fn include_grows_and_ignores_empty() {
        let mut aabb = AABB::empty();
        aabb.include(&AABB::new(Vec3(0.0, 0.0, 0.0), Vec3(1.0, 2.0, 3.0)));
        aabb.include(&AABB::empty());
        aabb.include_point(Vec3(-1.0, 0.5, 4.0));

        assert_eq!(aabb.minimum, Vec3(-1.0, 0.0, 0.0));
        assert_eq!(aabb.maximum, Vec3(1.0, 2.0, 4.0));
        assert_eq!(aabb.extents(), Vec3(2.0, 2.0, 4.0));
        assert_eq!(aabb.center(), Vec3(0.0, 1.0, 2.0));
    }

    #[test]
    fn single_point_box_is_valid() {
        let mut aabb = AABB::empty();
        aabb.include_point(Vec3(1.0, 1.0, 1.0));
        assert!(aabb.is_valid());
        assert_eq!(aabb.extent(2), 0.0);
    }
}
