use crate::geo::GeoPoint;

/// Anything that sits at a fixed point on the map.
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn location(&self) -> GeoPoint {
        (**self).location()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bin {
    pub id: String,
    pub location: GeoPoint,
}

impl Bin {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            location: GeoPoint::new(latitude, longitude),
        }
    }
}

impl Located for Bin {
    fn location(&self) -> GeoPoint {
        self.location
    }
}
