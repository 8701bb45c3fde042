use std::collections::VecDeque;

pub(crate) const MAX_MAILBOX_NOTICES: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    SetTheme { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

#[derive(Debug)]
struct Mailbox {
    id: SubscriberId,
    pending: VecDeque<Notice>,
}

#[derive(Debug, Default)]
pub struct NoticeBus {
    next_subscriber: u64,
    mailboxes: Vec<Mailbox>,
}

impl NoticeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> SubscriberId {
        // Ids are never reused; a stale handle after unsubscribing drains nothing.
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber = self.next_subscriber.saturating_add(1);
        self.mailboxes.push(Mailbox {
            id,
            pending: VecDeque::new(),
        });
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.mailboxes.retain(|mailbox| mailbox.id != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.mailboxes.len()
    }

    pub fn publish(&mut self, notice: Notice) {
        for mailbox in &mut self.mailboxes {
            push_bounded(&mut mailbox.pending, notice.clone(), MAX_MAILBOX_NOTICES);
        }
    }

    pub fn drain(&mut self, id: SubscriberId, out: &mut Vec<Notice>) {
        if let Some(mailbox) = self.mailboxes.iter_mut().find(|mailbox| mailbox.id == id) {
            out.extend(mailbox.pending.drain(..));
        }
    }
}

fn push_bounded(queue: &mut VecDeque<Notice>, value: Notice, max_len: usize) {
    if queue.len() == max_len {
        queue.pop_front();
    }
    queue.push_back(value);
}
