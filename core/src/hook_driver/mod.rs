use std::borrow::Cow;

use crossbeam::channel::{self, Sender};

use crate::error::HookError;

pub type TapName = Cow<'static, str>;

/// What an async tap hands back through [Done].
///
/// `Ok(None)` lets the next tap run, `Ok(Some(false))` tells the host to ignore the
/// dependency and `Err` aborts the current resolution.
pub type HookResult = Result<Option<bool>, HookError>;

type SyncTap<T> = Box<dyn Fn(&mut T) + Send + Sync>;
type AsyncTap<T> = Box<dyn Fn(Option<&mut T>, Done) + Send + Sync>;

pub struct SyncHook<T> {
  taps: Vec<(TapName, SyncTap<T>)>,
}

impl<T> Default for SyncHook<T> {
  fn default() -> Self {
    Self { taps: vec![] }
  }
}

impl<T> SyncHook<T> {
  pub fn tap(&mut self, name: impl Into<TapName>, f: impl Fn(&mut T) + Send + Sync + 'static) {
    self.taps.push((name.into(), Box::new(f)));
  }

  pub fn call(&self, arg: &mut T) {
    self.taps.iter().for_each(|(name, tap)| {
      log::trace!("call sync tap {}", name);
      tap(arg)
    })
  }

  pub fn tap_names(&self) -> Vec<&str> {
    self.taps.iter().map(|(name, _)| name.as_ref()).collect()
  }
}

/// Completion signal handed to every async tap.
///
/// Consumed on use, so a tap can signal at most once. Dropping it without signalling is
/// reported to the host as [HookError::CallbackDropped].
#[derive(Debug)]
pub struct Done {
  tap: TapName,
  tx: Sender<HookResult>,
}

impl Done {
  pub fn call(self, result: HookResult) {
    // The receiver only goes away once the hook gave up on this tap.
    let _ = self.tx.send(result);
  }

  #[inline]
  pub fn ok(self) {
    self.call(Ok(None))
  }

  pub fn fail(self, message: impl Into<String>) {
    let err = HookError::tap(self.tap.to_string(), message);
    self.call(Err(err))
  }
}

/// Taps run one after another. The first tap that signals something other than
/// `Ok(None)` ends the series.
pub struct AsyncSeriesBailHook<T> {
  taps: Vec<(TapName, AsyncTap<T>)>,
}

impl<T> Default for AsyncSeriesBailHook<T> {
  fn default() -> Self {
    Self { taps: vec![] }
  }
}

impl<T> AsyncSeriesBailHook<T> {
  /// Registers a tap that signals through [Done].
  ///
  /// `call` blocks the calling thread until `done` is signalled, and the host calls it from
  /// rayon workers. Don't signal completion from a task spawned on the same rayon pool.
  pub fn tap_async(
    &mut self,
    name: impl Into<TapName>,
    f: impl Fn(Option<&mut T>, Done) + Send + Sync + 'static,
  ) {
    self.taps.push((name.into(), Box::new(f)));
  }

  pub fn call(&self, mut arg: Option<&mut T>) -> HookResult {
    for (name, tap) in self.taps.iter() {
      let (tx, rx) = channel::bounded(1);
      tap(
        arg.as_deref_mut(),
        Done {
          tap: name.clone(),
          tx,
        },
      );
      match rx.recv() {
        Ok(Ok(None)) => continue,
        Ok(result) => return result,
        Err(_) => {
          return Err(HookError::CallbackDropped {
            plugin: name.to_string(),
          })
        }
      }
    }
    Ok(None)
  }

  pub fn tap_names(&self) -> Vec<&str> {
    self.taps.iter().map(|(name, _)| name.as_ref()).collect()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};
  use std::thread;

  use super::*;

  #[test]
  fn sync_taps_run_in_registration_order() {
    let mut hook = SyncHook::<Vec<&'static str>>::default();
    hook.tap("a", |log| log.push("a"));
    hook.tap("b", |log| log.push("b"));
    let mut log = vec![];
    hook.call(&mut log);
    assert_eq!(log, vec!["a", "b"]);
    assert_eq!(hook.tap_names(), vec!["a", "b"]);
  }

  #[test]
  fn series_passes_mutations_along() {
    let mut hook = AsyncSeriesBailHook::<String>::default();
    hook.tap_async("upper", |arg, done| {
      if let Some(s) = arg {
        *s = s.to_uppercase();
      }
      done.ok()
    });
    hook.tap_async("suffix", |arg, done| {
      if let Some(s) = arg {
        s.push('!');
      }
      done.ok()
    });
    let mut value = "hi".to_owned();
    assert_eq!(hook.call(Some(&mut value)), Ok(None));
    assert_eq!(value, "HI!");
  }

  #[test]
  fn bail_stops_the_series() {
    let calls = Arc::new(Mutex::new(0));
    let mut hook = AsyncSeriesBailHook::<String>::default();
    hook.tap_async("ignore", |_, done| done.call(Ok(Some(false))));
    let counter = calls.clone();
    hook.tap_async("never", move |_, done| {
      *counter.lock().unwrap() += 1;
      done.ok()
    });
    assert_eq!(hook.call(None), Ok(Some(false)));
    assert_eq!(*calls.lock().unwrap(), 0);
  }

  #[test]
  fn failing_tap_reports_its_name() {
    let mut hook = AsyncSeriesBailHook::<String>::default();
    hook.tap_async("broken", |_, done| done.fail("boom"));
    let err = hook.call(None).unwrap_err();
    assert_eq!(err.to_string(), "[broken] boom");
  }

  #[test]
  fn dropped_callback_is_an_error() {
    let mut hook = AsyncSeriesBailHook::<String>::default();
    hook.tap_async("forgetful", |_, _done| {});
    assert_eq!(
      hook.call(None),
      Err(HookError::CallbackDropped {
        plugin: "forgetful".to_owned()
      })
    );
  }

  #[test]
  fn done_may_be_signalled_from_another_thread() {
    let mut hook = AsyncSeriesBailHook::<String>::default();
    hook.tap_async("deferred", |_, done| {
      thread::spawn(move || done.ok());
    });
    assert_eq!(hook.call(None), Ok(None));
  }
}
