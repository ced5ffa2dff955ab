//! Frame collection and management.

use crate::id3v2::frames::Frame;
use indexmap::map::{IntoIter, Iter, IterMut, Keys};
use indexmap::IndexMap;
use std::ops::{Index, IndexMut};

/// The ordered collection of frames in a tag.
///
/// Frames are addressed by [`Frame::key`](Frame::key), which folds in the
/// description and language fields that allow comment and picture frames to
/// legally repeat under one identifier. Insertion order is preserved and is
/// the order frames are written back out in.
#[derive(Debug, Clone, Default)]
pub struct FrameMap {
    map: IndexMap<String, Frame>,
}

impl FrameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a frame, keeping the existing one if a frame with the same key
    /// is already present.
    pub fn add(&mut self, frame: Frame) {
        self.map.entry(frame.key()).or_insert(frame);
    }

    /// Adds a frame, overwriting any existing frame with the same key.
    pub fn insert(&mut self, frame: Frame) {
        self.map.insert(frame.key(), frame);
    }

    /// Removes every frame sharing the given frame's identifier and then
    /// adds the frame, collapsing legal duplicates into one entry.
    pub fn replace(&mut self, frame: Frame) {
        self.remove_all(frame.id().inner());
        self.add(frame);
    }

    pub fn get(&self, key: &str) -> Option<&Frame> {
        self.map.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Frame> {
        self.map.get_mut(key)
    }

    pub fn get_all(&self, id: &[u8; 4]) -> Vec<&Frame> {
        self.frames().filter(|frame| frame.id() == id).collect()
    }

    pub fn get_all_mut(&mut self, id: &[u8; 4]) -> Vec<&mut Frame> {
        self.frames_mut().filter(|frame| frame.id() == id).collect()
    }

    /// Removes and returns every frame with the given identifier. The
    /// relative order of the remaining frames is preserved.
    pub fn remove_all(&mut self, id: &[u8; 4]) -> Vec<Frame> {
        let mut removed = Vec::new();
        let mut i = 0;

        while i < self.map.len() {
            if self.map.get_index(i).unwrap().1.id() == id {
                // shift_remove keeps the insertion order of what remains,
                // unlike the faster swap_remove.
                removed.push(self.map.shift_remove_index(i).unwrap().1);
            } else {
                i += 1;
            }
        }

        removed
    }

    pub fn contains(&self, frame: &Frame) -> bool {
        self.contains_key(&frame.key())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn contains_any(&self, id: &[u8; 4]) -> bool {
        self.frames().any(|frame| frame.id() == id)
    }

    pub fn keys(&self) -> Keys<String, Frame> {
        self.map.keys()
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.map.values()
    }

    pub fn frames_mut(&mut self) -> impl Iterator<Item = &mut Frame> {
        self.map.values_mut()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Index<&str> for FrameMap {
    type Output = Frame;

    fn index(&self, key: &str) -> &Self::Output {
        &self.map[key]
    }
}

impl IndexMut<&str> for FrameMap {
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        &mut self.map[key]
    }
}

impl IntoIterator for FrameMap {
    type Item = (String, Frame);
    type IntoIter = IntoIter<String, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a> IntoIterator for &'a FrameMap {
    type Item = (&'a String, &'a Frame);
    type IntoIter = Iter<'a, String, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

impl<'a> IntoIterator for &'a mut FrameMap {
    type Item = (&'a String, &'a mut Frame);
    type IntoIter = IterMut<'a, String, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter_mut()
    }
}
