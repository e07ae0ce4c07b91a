use std::time::SystemTime;

/// Clock seam so tests can pin round timestamps and elapsed times.
pub trait Clock {
    fn now(&self) -> SystemTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Test clock that only moves when told to.
#[cfg(test)]
pub struct FixedClock {
    now: std::cell::Cell<SystemTime>,
}

#[cfg(test)]
impl FixedClock {
    pub fn at(now: SystemTime) -> std::rc::Rc<Self> {
        std::rc::Rc::new(Self {
            now: std::cell::Cell::new(now),
        })
    }

    pub fn advance(&self, by: std::time::Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.now.get()
    }
}
