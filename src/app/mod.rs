// Front ends that drive an entry session.

pub mod terminal;
