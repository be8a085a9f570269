use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

struct Shared<I: Iterator> {
    source: I,
    buffer: VecDeque<I::Item>,
    /// The cursor the buffered items are waiting for.
    behind: Side,
}

pub struct TeeCursor<I: Iterator> {
    shared: Rc<RefCell<Shared<I>>>,
    side: Side,
}

/// Splits one lazy sequence into two independent cursors.
///
/// Items pulled by the cursor that is ahead are buffered until the other
/// cursor catches up, so the source is only iterated once.
pub fn tee<I>(source: I) -> (TeeCursor<I::IntoIter>, TeeCursor<I::IntoIter>)
where
    I: IntoIterator,
    I::Item: Clone,
{
    let shared = Rc::new(RefCell::new(Shared {
        source: source.into_iter(),
        buffer: VecDeque::new(),
        behind: Side::Left,
    }));
    (
        TeeCursor {
            shared: Rc::clone(&shared),
            side: Side::Left,
        },
        TeeCursor {
            shared,
            side: Side::Right,
        },
    )
}

impl<I> TeeCursor<I>
where
    I: Iterator,
{
    /// Items produced by the other cursor that this one has not seen yet.
    pub fn buffered(&self) -> usize {
        let shared = self.shared.borrow();
        if shared.behind == self.side {
            shared.buffer.len()
        } else {
            0
        }
    }
}

impl<I> Iterator for TeeCursor<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let mut shared = self.shared.borrow_mut();
        if shared.behind == self.side {
            if let Some(item) = shared.buffer.pop_front() {
                return Some(item);
            }
        }
        let item = shared.source.next()?;
        // only buffer while the other cursor is still alive
        if Rc::strong_count(&self.shared) > 1 {
            shared.buffer.push_back(item.clone());
            shared.behind = match self.side {
                Side::Left => Side::Right,
                Side::Right => Side::Left,
            };
        }
        Some(item)
    }
}
