//! Fixed-size lesson blocks over the sentence collection.

use crate::types::Sentence;
use serde::{Deserialize, Serialize};

/// Number of sentences per lesson.
pub const DEFAULT_BLOCK_SIZE: usize = 10;

/// Read-only contiguous slice of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lesson<'a, T = Sentence> {
    pub index: usize,
    /// Collection index of the first item.
    pub offset: usize,
    pub items: &'a [T],
}

impl<'a, T> Lesson<'a, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, local_index: usize) -> Option<&'a T> {
        self.items.get(local_index)
    }

    /// Collection index of a lesson-local index.
    pub fn collection_index(&self, local_index: usize) -> usize {
        self.offset + local_index
    }
}

/// Split items into consecutive lessons of `block_size`.
///
/// The last lesson may be shorter. A block size of zero is treated as one.
pub fn partition<T>(items: &[T], block_size: usize) -> Vec<Lesson<'_, T>> {
    let block_size = block_size.max(1);
    items
        .chunks(block_size)
        .enumerate()
        .map(|(index, items)| Lesson {
            index,
            offset: index * block_size,
            items,
        })
        .collect()
}

/// Lesson holding the item at `item_index`.
pub fn lesson_index_of(item_index: usize, block_size: usize) -> usize {
    item_index / block_size.max(1)
}

pub fn lesson_count(item_count: usize, block_size: usize) -> usize {
    item_count.div_ceil(block_size.max(1))
}

/// Entry of the lesson picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSummary {
    pub index: usize,
    pub sentence_count: usize,
    pub preview: String,
}

pub fn summaries(sentences: &[Sentence], block_size: usize) -> Vec<LessonSummary> {
    partition(sentences, block_size)
        .into_iter()
        .map(|lesson| LessonSummary {
            index: lesson.index,
            sentence_count: lesson.len(),
            preview: lesson
                .get(0)
                .map(|s| s.source_text.clone())
                .unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MeaningMap, SentenceId};

    #[test]
    fn test_partition_23_into_10_10_3() {
        let items: Vec<usize> = (0..23).collect();
        let lessons = partition(&items, 10);
        let sizes: Vec<usize> = lessons.iter().map(Lesson::len).collect();
        assert_eq!(sizes, vec![10, 10, 3]);
        assert_eq!(lessons[2].get(0), Some(&20));
        assert_eq!(lessons[1].collection_index(5), 15);
        assert_eq!(lesson_index_of(15, 10), 1);
        assert_eq!(lesson_count(23, 10), 3);
    }

    #[test]
    fn test_partition_exact_multiple() {
        let items: Vec<usize> = (0..20).collect();
        assert_eq!(partition(&items, 10).len(), 2);
        assert_eq!(lesson_index_of(19, 10), 1);
        assert_eq!(lesson_index_of(20, 10), 2);
    }

    #[test]
    fn test_partition_empty() {
        let items: Vec<usize> = Vec::new();
        assert!(partition(&items, 10).is_empty());
        assert_eq!(lesson_count(0, 10), 0);
    }

    #[test]
    fn test_zero_block_size_is_one() {
        let items = [1, 2, 3];
        assert_eq!(partition(&items, 0).len(), 3);
        assert_eq!(lesson_index_of(2, 0), 2);
    }

    #[test]
    fn test_summaries_preview_first_sentence() {
        let sentences: Vec<Sentence> = (0..12)
            .map(|i| Sentence {
                id: SentenceId(i.to_string()),
                source_text: format!("Satz {i}"),
                target_text: format!("Cümle {i}"),
                word_meanings: MeaningMap::new(),
                note: String::new(),
            })
            .collect();
        let picks = summaries(&sentences, 10);
        assert_eq!(picks.len(), 2);
        assert_eq!(picks[1].sentence_count, 2);
        assert_eq!(picks[1].preview, "Satz 10");
    }
}
