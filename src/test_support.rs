//! Shared helpers for unit tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use axum::Router;

use crate::cli::context::{Context, Prompt};
use crate::config::Config;
use crate::output::Flags;

/// Serve `router` on an ephemeral port and return its base URL
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Answers prompts from a queue; running out is an error
pub struct Answers(RefCell<VecDeque<String>>);

impl Answers {
    pub fn new(answers: &[&str]) -> Self {
        Self(RefCell::new(answers.iter().map(|a| a.to_string()).collect()))
    }

    fn next(&self, message: &str) -> Result<String> {
        self.0
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("unexpected prompt: {}", message))
    }
}

impl Prompt for Answers {
    fn input(&self, message: &str) -> Result<String> {
        self.next(message)
    }

    fn confirm(&self, message: &str) -> Result<bool> {
        Ok(matches!(self.next(message)?.as_str(), "y" | "yes"))
    }

    fn select(&self, message: &str, _items: &[&str]) -> Result<usize> {
        Ok(self.next(message)?.parse()?)
    }
}

/// Cloneable sink that lets a test read what a command printed
#[derive(Clone, Default)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Logged-in context rooted at `dir`, without colors
pub fn context(dir: &Path, api_url: &str, answers: &[&str]) -> (Context, Buffer) {
    let buffer = Buffer::default();
    let flags = Flags {
        no_color: true,
        ..Flags::default()
    };
    let mut ctx = Context::new(
        Config::for_test(dir, api_url),
        flags,
        false,
        Box::new(Answers::new(answers)),
        Box::new(buffer.clone()),
    )
    .unwrap();
    ctx.settings.token = Some("test-token".into());
    (ctx, buffer)
}
