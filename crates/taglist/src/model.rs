use html::Id;

/// Element ids making up one rendered chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChipHandle {
    /// The `<a>` carrying class, href and title.
    pub anchor: Id,
    /// Close control inside the anchor.
    pub close: Id,
    /// Label inside the anchor; holds the possibly elided text.
    pub label: Id,
    /// Separator span inserted after the anchor.
    pub spacer: Id,
}

/// Trim a raw tag; `None` when nothing is left.
pub fn normalize_tag(raw: &str) -> Option<&str> {
    let tag = raw.trim();
    (!tag.is_empty()).then_some(tag)
}

/// Ordered, duplicate-free tags with their chips kept index-aligned.
#[derive(Clone, Debug, Default)]
pub(crate) struct TagModel {
    tags: Vec<String>,
    chips: Vec<ChipHandle>,
}

impl TagModel {
    pub(crate) fn tags(&self) -> &[String] {
        &self.tags
    }

    pub(crate) fn chips(&self) -> &[ChipHandle] {
        &self.chips
    }

    pub(crate) fn len(&self) -> usize {
        self.tags.len()
    }

    pub(crate) fn contains(&self, tag: &str) -> bool {
        self.position(tag).is_some()
    }

    pub(crate) fn position(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|t| t == tag)
    }

    pub(crate) fn position_of_chip(&self, pred: impl Fn(&ChipHandle) -> bool) -> Option<usize> {
        self.chips.iter().position(pred)
    }

    pub(crate) fn push(&mut self, tag: String, chip: ChipHandle) {
        debug_assert!(!self.contains(&tag), "duplicate tag reached the model");
        self.tags.push(tag);
        self.chips.push(chip);
        debug_assert_eq!(self.tags.len(), self.chips.len());
    }

    pub(crate) fn remove(&mut self, index: usize) -> (String, ChipHandle) {
        let tag = self.tags.remove(index);
        let chip = self.chips.remove(index);
        debug_assert_eq!(self.tags.len(), self.chips.len());
        (tag, chip)
    }

    pub(crate) fn drain(&mut self) -> Vec<ChipHandle> {
        self.tags.clear();
        std::mem::take(&mut self.chips)
    }
}
