use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use super::store::{BlockStore, BlockStoreError};
use crate::linked_data::Cid;

/// Block store backed by a directory on disk.
///  One file per block, named by the block's CID string.
#[derive(Debug, Clone)]
pub struct FsBlockStore {
    root: PathBuf,
}

impl FsBlockStore {
    /// Open a block store rooted at `path`, creating the
    ///  directory if it does not exist yet.
    pub async fn open(path: &Path) -> Result<Self, BlockStoreError> {
        tracing::debug!("FsBlockStore::open called with path: {:?}", path);
        tokio::fs::create_dir_all(path).await?;
        Ok(Self {
            root: path.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn block_path(&self, cid: &Cid) -> PathBuf {
        self.root.join(cid.to_string())
    }
}

/// Write `data` to a temp file unique to this writer, then rename it over `path`.
///  Readers never see a partial block. The temp file is removed on any error.
fn write_block(root: &Path, path: &Path, data: &[u8]) -> Result<(), BlockStoreError> {
    let mut tmp = tempfile::Builder::new()
        .prefix(".")
        .suffix(".tmp")
        .tempfile_in(root)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;

    match tmp.persist(path) {
        Ok(_) => Ok(()),
        // another writer of the same block got there first
        Err(_) if path.exists() => Ok(()),
        Err(e) => Err(e.error.into()),
    }
}

#[async_trait]
impl BlockStore for FsBlockStore {
    async fn get(&self, cid: &Cid) -> Result<Bytes, BlockStoreError> {
        match tokio::fs::read(self.block_path(cid)).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("FsBlockStore::get: block {} not found", cid);
                Err(BlockStoreError::NotFound(*cid))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, cid: Cid, data: Bytes) -> Result<(), BlockStoreError> {
        let path = self.block_path(&cid);
        if tokio::fs::try_exists(&path).await? {
            return Ok(());
        }

        let root = self.root.clone();
        let len = data.len();
        tokio::task::spawn_blocking(move || write_block(&root, &path, &data))
            .await
            .map_err(|e| anyhow::anyhow!("block write task failed: {}", e))??;

        tracing::debug!("FsBlockStore::put: stored {} ({} bytes)", cid, len);
        Ok(())
    }

    async fn has(&self, cid: &Cid) -> Result<bool, BlockStoreError> {
        Ok(tokio::fs::try_exists(self.block_path(cid)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::Node;
    use crate::linked_data::{cid_for, RAW_CODEC};

    #[tokio::test]
    async fn test_fs_put_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlockStore::open(&dir.path().join("blocks")).await.unwrap();

        let data = Bytes::from_static(b"on disk");
        let cid = cid_for(RAW_CODEC, &data).unwrap();
        store.put(cid, data.clone()).await.unwrap();

        assert!(store.has(&cid).await.unwrap());
        assert_eq!(store.get(&cid).await.unwrap(), data);
        assert!(store.root().join(cid.to_string()).exists());
    }

    #[tokio::test]
    async fn test_fs_missing_block() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlockStore::open(dir.path()).await.unwrap();
        let cid = cid_for(RAW_CODEC, b"nothing here").unwrap();

        assert!(!store.has(&cid).await.unwrap());
        assert!(matches!(
            store.get(&cid).await,
            Err(BlockStoreError::NotFound(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_fs_concurrent_puts_of_one_block() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlockStore::open(dir.path()).await.unwrap();

        for round in 0..20u8 {
            let data = Bytes::from(vec![round; 256 * 1024]);
            let cid = cid_for(RAW_CODEC, &data).unwrap();

            let writers = (0..8).map(|_| {
                let store = store.clone();
                let data = data.clone();
                tokio::spawn(async move { store.put(cid, data).await })
            });
            for result in futures::future::join_all(writers).await {
                result.unwrap().unwrap();
            }

            assert_eq!(store.get(&cid).await.unwrap(), data);
        }

        // only finished blocks remain, no temp files
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        let mut count = 0;
        while let Some(entry) = entries.next_entry().await.unwrap() {
            let name = entry.file_name().to_string_lossy().into_owned();
            assert!(!name.starts_with('.'), "leftover temp file {name}");
            count += 1;
        }
        assert_eq!(count, 20);
    }

    #[tokio::test]
    async fn test_fs_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let mut node = Node::new();
        node.insert("child", cid_for(RAW_CODEC, b"child").unwrap());

        let cid = {
            let store = FsBlockStore::open(dir.path()).await.unwrap();
            store.put_node(&node).await.unwrap()
        };

        let reopened = FsBlockStore::open(dir.path()).await.unwrap();
        assert_eq!(reopened.get_node(&cid).await.unwrap(), node);
    }
}
