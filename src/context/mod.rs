mod layer;

pub use layer::{Layer, LayerId};

use slotmap::SlotMap;

use crate::error::{ContextError, Result};
use crate::geometry::{Aabb, Element, PointRef, Polyline, ReferencePoint, Shape};
use crate::math::{Point2, Vector2};
use crate::operations::modification::{Fillet, Join, Trim, TrimResult};
use crate::operations::offset::Offsetable;
use crate::operations::transform::{Mirror, Translate};

slotmap::new_key_type! {
    /// Unique identifier for an element in an edit context.
    pub struct ElementId;
}

/// Owns the drawing being edited: its elements, layers, the active layer
/// and the visible area.
///
/// Editing commands take element ids, run the matching operation and write
/// the result back, so callers never hold elements across an edit.
#[derive(Debug)]
pub struct EditContext {
    elements: SlotMap<ElementId, Element>,
    layers: SlotMap<LayerId, Layer>,
    active_layer: Option<LayerId>,
    view: Aabb,
}

impl EditContext {
    /// Creates an empty context showing `view`.
    #[must_use]
    pub fn new(view: Aabb) -> Self {
        Self {
            elements: SlotMap::with_key(),
            layers: SlotMap::with_key(),
            active_layer: None,
            view,
        }
    }

    // --- Layers ---

    /// Adds a layer and returns its ID.
    pub fn add_layer(&mut self, name: impl Into<String>) -> LayerId {
        self.layers.insert(Layer::new(name))
    }

    /// # Errors
    ///
    /// Returns `ContextError::LayerNotFound` if the layer does not exist.
    pub fn layer(&self, id: LayerId) -> Result<&Layer> {
        Ok(self.layers.get(id).ok_or(ContextError::LayerNotFound)?)
    }

    /// Sets the layer new elements are placed on.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::LayerNotFound` if the layer does not exist.
    pub fn set_active_layer(&mut self, id: Option<LayerId>) -> Result<()> {
        if let Some(id) = id {
            self.layer(id)?;
        }
        self.active_layer = id;
        Ok(())
    }

    #[must_use]
    pub fn active_layer(&self) -> Option<LayerId> {
        self.active_layer
    }

    #[must_use]
    pub fn view(&self) -> &Aabb {
        &self.view
    }

    pub fn set_view(&mut self, view: Aabb) {
        self.view = view;
    }

    // --- Elements ---

    /// Inserts an element and returns its ID. Elements without a layer are
    /// placed on the active layer.
    pub fn insert(&mut self, element: impl Into<Element>) -> ElementId {
        let mut element = element.into();
        if element.layer().is_none() {
            element.set_layer(self.active_layer);
        }
        self.elements.insert(element)
    }

    /// # Errors
    ///
    /// Returns `ContextError::ElementNotFound` if the element does not exist.
    pub fn element(&self, id: ElementId) -> Result<&Element> {
        Ok(self.elements.get(id).ok_or(ContextError::ElementNotFound)?)
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        Ok(self.elements.get_mut(id).ok_or(ContextError::ElementNotFound)?)
    }

    /// Removes an element, returning it.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::ElementNotFound` if the element does not exist.
    pub fn remove(&mut self, id: ElementId) -> Result<Element> {
        Ok(self.elements.remove(id).ok_or(ContextError::ElementNotFound)?)
    }

    #[must_use]
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Grip markers of an element that fall inside the current view.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::ElementNotFound` if the element does not exist.
    pub fn reference_points(&self, id: ElementId) -> Result<Vec<ReferencePoint>> {
        Ok(self.element(id)?.reference_points(&self.view))
    }

    /// Window selection: every element with some part inside `area`.
    #[must_use]
    pub fn select(&self, area: &Aabb) -> Vec<ElementId> {
        let hits: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|(_, element)| element.intersects(area))
            .map(|(id, _)| id)
            .collect();
        tracing::trace!(selected = hits.len(), "window selection");
        hits
    }

    // --- Editing commands ---

    /// Trims a polyline at the piece around `click`, using every other
    /// element as a cutting reference.
    ///
    /// Returns the IDs now standing for the polyline: the same ID when
    /// nothing was cut, the fragments' new IDs otherwise (empty if the whole
    /// polyline went away).
    ///
    /// # Errors
    ///
    /// Returns `ContextError::ElementNotFound` for a missing element and
    /// `ContextError::UnsupportedElement` if it is not a polyline.
    pub fn trim(&mut self, id: ElementId, click: Point2) -> Result<Vec<ElementId>> {
        let polyline = self.polyline(id, "trim")?;
        let references: Vec<Element> = self
            .elements
            .iter()
            .filter(|(other, _)| *other != id)
            .map(|(_, element)| element.clone())
            .collect();

        let result = Trim::new(&polyline, &references, click).execute();
        tracing::debug!(?id, references = references.len(), ?result, "trim");
        match result {
            TrimResult::NoChange => Ok(vec![id]),
            TrimResult::Removed => {
                self.elements.remove(id);
                Ok(Vec::new())
            }
            TrimResult::Replaced(fragments) => {
                self.elements.remove(id);
                Ok(fragments.into_iter().map(|f| self.elements.insert(f.into())).collect())
            }
        }
    }

    /// Adds a copy of an element at `distance` on the side of `side`.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::ElementNotFound` for a missing element, or the
    /// offset's `OperationError::InvalidParameter`.
    pub fn offset(&mut self, id: ElementId, distance: f64, side: &Point2) -> Result<ElementId> {
        let element = self.element(id)?;
        let signed = if element.is_positive_direction(side) {
            distance.abs()
        } else {
            -distance.abs()
        };
        tracing::debug!(?id, distance = signed, "offset");
        let copy = element.clone_with_distance(signed)?;
        Ok(self.elements.insert(copy))
    }

    /// Moves an end of a polyline to `intersection`, keeping the part towards
    /// `direction`. Returns `false` when no fillet is possible.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::ElementNotFound` for a missing element and
    /// `ContextError::UnsupportedElement` if it is not a polyline.
    pub fn fillet(
        &mut self,
        id: ElementId,
        intersection: Point2,
        direction: Point2,
    ) -> Result<bool> {
        let polyline = self.polyline(id, "fillet")?;
        let Some(result) = Fillet::new(&polyline, intersection, direction).execute() else {
            tracing::debug!(?id, "fillet not possible");
            return Ok(false);
        };
        *self.element_mut(id)? = result.into();
        Ok(true)
    }

    /// Joins a polyline with a segment or another polyline. On success both
    /// inputs are replaced by the joined polyline and its ID is returned.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::ElementNotFound` for a missing element and
    /// `ContextError::UnsupportedElement` if `target` is not a polyline or
    /// `other` is an arc.
    pub fn join(&mut self, target: ElementId, other: ElementId) -> Result<Option<ElementId>> {
        let polyline = self.polyline(target, "join")?;
        if target == other {
            return Ok(None);
        }
        let joined = match self.element(other)? {
            Element::Segment(segment) => Join::with_segment(&polyline, segment).execute(),
            Element::Polyline(second) => Join::with_polyline(&polyline, second).execute(),
            Element::Arc(_) => {
                return Err(ContextError::UnsupportedElement {
                    operation: "join",
                    kind: "arc",
                }
                .into())
            }
        };
        tracing::debug!(?target, ?other, joined = joined.is_some(), "join");

        let Some(joined) = joined else {
            return Ok(None);
        };
        self.elements.remove(target);
        self.elements.remove(other);
        Ok(Some(self.elements.insert(joined.into())))
    }

    /// Moves the addressed points of an element. Returns `false`, leaving it
    /// unchanged, when the move is rejected.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::ElementNotFound` if the element does not exist.
    pub fn move_points(
        &mut self,
        id: ElementId,
        points: Vec<PointRef>,
        vector: Vector2,
    ) -> Result<bool> {
        let element = self.element_mut(id)?;
        Ok(Translate::new(vector).with_points(points).execute(element))
    }

    /// Moves a whole element.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::ElementNotFound` if the element does not exist.
    pub fn translate(&mut self, id: ElementId, vector: Vector2) -> Result<()> {
        let element = self.element_mut(id)?;
        Translate::new(vector).execute(element);
        Ok(())
    }

    /// Reflects an element across the line through `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::ElementNotFound` for a missing element and
    /// `OperationError::InvalidArgument` if `a` and `b` coincide.
    pub fn mirror(&mut self, id: ElementId, a: Point2, b: Point2) -> Result<()> {
        let element = self.element_mut(id)?;
        Mirror::new(a, b).execute(element)
    }

    fn polyline(&self, id: ElementId, operation: &'static str) -> Result<Polyline> {
        match self.element(id)? {
            Element::Polyline(p) => Ok(p.clone()),
            other => Err(ContextError::UnsupportedElement {
                operation,
                kind: other.kind(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DraftError;
    use crate::geometry::{Arc, Segment};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn context() -> EditContext {
        EditContext::new(Aabb::new(p(-100.0, -100.0), p(100.0, 100.0)))
    }

    fn l_shape() -> Polyline {
        Polyline::new(vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)]).unwrap()
    }

    #[test]
    fn insert_uses_active_layer() {
        let mut ctx = context();
        let walls = ctx.add_layer("walls");
        ctx.set_active_layer(Some(walls)).unwrap();
        let id = ctx.insert(l_shape());
        assert_eq!(ctx.element(id).unwrap().layer(), Some(walls));
        assert_eq!(ctx.layer(walls).unwrap().name(), "walls");
    }

    #[test]
    fn missing_ids_are_reported() {
        let mut ctx = context();
        let id = ctx.insert(l_shape());
        ctx.remove(id).unwrap();
        assert!(matches!(
            ctx.element(id).unwrap_err(),
            DraftError::Context(ContextError::ElementNotFound)
        ));

        let mut other = context();
        let foreign = other.add_layer("x");
        assert!(matches!(
            ctx.set_active_layer(Some(foreign)).unwrap_err(),
            DraftError::Context(ContextError::LayerNotFound)
        ));
    }

    #[test]
    fn trim_replaces_polyline_with_fragments() {
        let mut ctx = context();
        let target = ctx.insert(l_shape());
        ctx.insert(Segment::new(p(5.0, -5.0), p(5.0, 5.0)).unwrap());

        let ids = ctx.trim(target, p(7.0, 0.0)).unwrap();
        assert_eq!(ids.len(), 1);
        assert!(ctx.element(target).is_err());
        let kept = Polyline::new(vec![p(0.0, 0.0), p(5.0, 0.0)]).unwrap();
        assert_eq!(ctx.element(ids[0]).unwrap(), &Element::Polyline(kept));
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn trim_without_crossings_keeps_id() {
        let mut ctx = context();
        let target = ctx.insert(l_shape());
        assert_eq!(ctx.trim(target, p(3.0, 0.0)).unwrap(), vec![target]);
    }

    #[test]
    fn trim_rejects_non_polylines() {
        let mut ctx = context();
        let id = ctx.insert(Segment::new(p(0.0, 0.0), p(1.0, 0.0)).unwrap());
        let err = ctx.trim(id, p(0.5, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            DraftError::Context(ContextError::UnsupportedElement {
                operation: "trim",
                kind: "segment"
            })
        ));
    }

    #[test]
    fn offset_follows_the_side_point() {
        let mut ctx = context();
        let id = ctx.insert(l_shape());
        let inner = ctx.offset(id, 1.0, &p(5.0, 2.0)).unwrap();
        let outer = ctx.offset(id, 1.0, &p(5.0, -1.0)).unwrap();
        assert!(ctx.element(inner).unwrap().contains(&p(9.0, 5.0)));
        assert!(ctx.element(outer).unwrap().contains(&p(11.0, 5.0)));
        assert_eq!(ctx.len(), 3);
    }

    #[test]
    fn fillet_and_join_edit_in_place() {
        let mut ctx = context();
        let id = ctx.insert(l_shape());
        assert!(ctx.fillet(id, p(-3.0, 0.0), p(1.0, 0.0)).unwrap());
        assert!(!ctx.fillet(id, p(5.0, 5.0), p(1.0, 0.0)).unwrap());

        let seg = ctx.insert(Segment::new(p(10.0, 10.0), p(0.0, 10.0)).unwrap());
        let joined = ctx.join(id, seg).unwrap().unwrap();
        assert_eq!(ctx.len(), 1);
        match ctx.element(joined).unwrap() {
            Element::Polyline(p) => assert_eq!(p.segment_count(), 3),
            other => panic!("expected a polyline, got {other:?}"),
        }
    }

    #[test]
    fn join_with_arc_is_unsupported() {
        let mut ctx = context();
        let id = ctx.insert(l_shape());
        let arc = Arc::from_center(p(1.0, 0.0), p(-1.0, 0.0), Point2::origin(), true).unwrap();
        let arc = ctx.insert(arc);
        assert!(ctx.join(id, arc).is_err());
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn moves_and_mirror() {
        let mut ctx = context();
        let id = ctx.insert(l_shape());
        assert!(ctx
            .move_points(id, vec![PointRef::Vertex(0)], Vector2::new(0.0, -2.0))
            .unwrap());
        ctx.translate(id, Vector2::new(1.0, 0.0)).unwrap();
        assert!(ctx.element(id).unwrap().contains(&p(1.0, -2.0)));

        ctx.mirror(id, p(0.0, 0.0), p(1.0, 0.0)).unwrap();
        assert!(ctx.element(id).unwrap().contains(&p(11.0, -10.0)));
        assert!(ctx.mirror(id, p(1.0, 1.0), p(1.0, 1.0)).is_err());
    }

    #[test]
    fn reference_points_respect_the_view() {
        let mut ctx = context();
        let id = ctx.insert(l_shape());
        let all = ctx.reference_points(id).unwrap().len();
        ctx.set_view(Aabb::new(p(-1.0, -1.0), p(1.0, 1.0)));
        let visible = ctx.reference_points(id).unwrap();
        assert!(visible.len() < all);
        assert!(visible.iter().all(|r| r.position == p(0.0, 0.0)));
    }

    #[test]
    fn window_selects_touched_elements() {
        let mut ctx = context();
        let chain = ctx.insert(l_shape());
        let cutter = ctx.insert(Segment::new(p(5.0, -5.0), p(5.0, 5.0)).unwrap());
        let arc = Arc::from_center(p(31.0, 0.0), p(29.0, 0.0), p(30.0, 0.0), true).unwrap();
        let cap = ctx.insert(arc);

        let picked = ctx.select(&Aabb::new(p(4.0, -1.0), p(6.0, 1.0)));
        assert_eq!(picked.len(), 2);
        assert!(picked.contains(&chain) && picked.contains(&cutter));

        // Under the arc, inside its chord: nothing is touched.
        assert!(ctx.select(&Aabb::new(p(29.5, 0.1), p(30.5, 0.5))).is_empty());
        assert_eq!(ctx.select(&Aabb::new(p(29.5, 0.5), p(30.5, 1.5))), vec![cap]);
    }
}
