//! Demand-loaded, write-back page cache over the backing file.
//!
//! The slot array is fixed-size rather than a hash map so page numbers map
//! directly to array indices and the working set is bounded by construction.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::errors::Error;
use crate::node::{Page, PAGE_SIZE, TABLE_MAX_PAGES};

pub struct Pager {
    file: File,
    pub num_pages: u32,
    pages: Box<[Option<Box<Page>>; TABLE_MAX_PAGES]>,
}

impl Pager {
    pub fn open(path: impl AsRef<Path>) -> Result<Pager, Error> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        let file_length = file.metadata()?.len();
        if file_length % PAGE_SIZE as u64 != 0 {
            return Err(Error::Fatal(
                "Db file is not a whole number of pages. Corrupt file.".into(),
            ));
        }
        let num_pages = (file_length / PAGE_SIZE as u64) as u32;
        tracing::debug!(num_pages, "pager opened");

        Ok(Pager {
            file,
            num_pages,
            pages: Box::new(std::array::from_fn(|_| None)),
        })
    }

    /// Returns the resident buffer for `page_num`, lazily allocating and, if
    /// the page already exists on disk, lazily loading it.
    pub fn get_page(&mut self, page_num: u32) -> Result<&mut Page, Error> {
        if page_num as usize >= TABLE_MAX_PAGES {
            return Err(Error::Fatal(format!(
                "Tried to fetch page number out of bounds: {page_num} > {TABLE_MAX_PAGES}"
            )));
        }

        let slot = &mut self.pages[page_num as usize];
        if slot.is_none() {
            let mut page: Box<Page> = Box::new([0u8; PAGE_SIZE]);
            if page_num < self.num_pages {
                self.file.seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))?;
                self.file.read_exact(page.as_mut())?;
                tracing::debug!(page_num, "page loaded from disk");
            } else {
                tracing::debug!(page_num, "page allocated in memory");
            }
            *slot = Some(page);
        }

        if page_num >= self.num_pages {
            self.num_pages = page_num + 1;
        }

        Ok(slot.as_mut().unwrap().as_mut())
    }

    /// Flushes a resident page to disk. Flushing an absent page is a
    /// programmer error: there is nothing to write and nothing to preserve.
    pub fn flush(&mut self, page_num: u32) -> Result<(), Error> {
        let page = self.pages[page_num as usize]
            .as_ref()
            .ok_or_else(|| Error::Fatal(format!("Tried to flush absent page {page_num}")))?;
        self.file.seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))?;
        self.file.write_all(page.as_ref())?;
        tracing::debug!(page_num, "page flushed");
        Ok(())
    }

    pub fn is_resident(&self, page_num: u32) -> bool {
        self.pages[page_num as usize].is_some()
    }
}
