use crate::kdtree::KdTree;
use crate::point::Point;
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

fn to_js_error<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM wrapper for the 3D k-d tree.
#[wasm_bindgen(js_name = KdTree3D)]
pub struct KdTree3D {
    inner: KdTree,
}

#[wasm_bindgen(js_class = KdTree3D)]
impl KdTree3D {
    /// Builds a balanced tree from interleaved `x, y, z` coordinates. Without `ids` the points
    /// are numbered by position.
    #[wasm_bindgen(constructor)]
    pub fn new(coords: &[f64], ids: Option<Vec<u64>>) -> Result<KdTree3D, JsValue> {
        let ids = ids.unwrap_or_else(|| (0..(coords.len() / 3) as u64).collect());
        let inner = KdTree::from_flat(&ids, coords).map_err(to_js_error)?;
        Ok(KdTree3D { inner })
    }

    /// An empty tree, to be grown with `insert`.
    pub fn empty() -> KdTree3D {
        KdTree3D { inner: KdTree::new() }
    }

    pub fn insert(&mut self, id: u64, x: f64, y: f64, z: f64) {
        self.inner.insert(Point::new(id, x, y, z));
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.inner.height()
    }

    /// Id of the closest point. Throws on an empty tree.
    pub fn nearest(&self, x: f64, y: f64, z: f64) -> Result<u64, JsValue> {
        self.inner
            .find_nearest([x, y, z])
            .map(|p| p.id)
            .map_err(to_js_error)
    }

    /// Position of the closest point as `[x, y, z]`. Throws on an empty tree.
    pub fn nearest_position(&self, x: f64, y: f64, z: f64) -> Result<Vec<f64>, JsValue> {
        self.inner
            .find_nearest([x, y, z])
            .map(|p| p.coords.to_vec())
            .map_err(to_js_error)
    }

    /// Ids of all points strictly within the squared radius, in discovery order.
    pub fn in_radius(&self, x: f64, y: f64, z: f64, radius_squared: f64) -> Vec<u64> {
        self.inner
            .find_in_radius([x, y, z], radius_squared)
            .iter()
            .map(|m| m.point.id)
            .collect()
    }

    /// Squared distances matching `in_radius` entry for entry.
    pub fn in_radius_distances(&self, x: f64, y: f64, z: f64, radius_squared: f64) -> Vec<f64> {
        self.inner
            .find_in_radius([x, y, z], radius_squared)
            .iter()
            .map(|m| m.distance_squared)
            .collect()
    }

    /// All matches as `{ id, distanceSquared }` objects.
    pub fn matches(&self, x: f64, y: f64, z: f64, radius_squared: f64) -> Result<Array, JsValue> {
        let out = Array::new();
        for m in self.inner.find_in_radius([x, y, z], radius_squared) {
            let obj = Object::new();
            Reflect::set(&obj, &"id".into(), &JsValue::from(m.point.id))?;
            Reflect::set(&obj, &"distanceSquared".into(), &JsValue::from_f64(m.distance_squared))?;
            out.push(&obj);
        }
        Ok(out)
    }

    /// Graphviz rendering of the tree structure.
    pub fn to_dot(&self) -> String {
        self.inner.to_dot()
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_string_js(&self) -> String {
        self.inner.to_string()
    }
}
