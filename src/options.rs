// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Worker queue options

use std::default::Default;

/// Options for the thread backing a `WorkerQueue`
#[derive(Debug, Clone)]
pub struct Options {
    pub stack_size: usize,
    pub name: Option<String>,
}

/// Default worker stack size, 2MB
pub const DEFAULT_STACK: usize = 2 * 1024 * 1024; // 2MB

/// Thread name used when none is configured
pub const DEFAULT_NAME: &str = "deferred-worker";

impl Options {
    pub fn new() -> Options {
        Options {
            stack_size: DEFAULT_STACK,
            name: None,
        }
    }

    pub fn stack_size(&mut self, size: usize) -> &mut Options {
        self.stack_size = size;
        self
    }

    pub fn name(&mut self, name: String) -> &mut Options {
        self.name = Some(name);
        self
    }

    /// The configured thread name, or `DEFAULT_NAME`
    pub fn thread_name(&self) -> &str {
        self.name.as_ref().map(|s| &s[..]).unwrap_or(DEFAULT_NAME)
    }
}

impl Default for Options {
    fn default() -> Options {
        Options::new()
    }
}
