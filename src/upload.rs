use crate::{config::Config, error::Error, s3::ObjectStore};
use futures::{future::BoxFuture, stream::FuturesUnordered, FutureExt, StreamExt};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::{fs, fs::File, io::AsyncReadExt};

/// Walks the configured source root and uploads every file beneath it.
///
/// Each directory fans out into one concurrent task per child, so sibling
/// reads and puts overlap. A directory only resolves once every child has
/// resolved; the first failure wins and later ones are logged.
pub async fn upload_source(store: &dyn ObjectStore, config: &Config) -> Result<(), Error> {
    visit(store, config, PathBuf::from(&config.source)).await
}

fn visit<'a>(
    store: &'a dyn ObjectStore,
    config: &'a Config,
    path: PathBuf,
) -> BoxFuture<'a, Result<(), Error>> {
    async move {
        let traversal = |source| Error::Traversal {
            path: path.clone(),
            source,
        };

        //lstat semantics: a symlink is not a directory, it gets read like a file
        let stat = fs::symlink_metadata(&path).await.map_err(traversal)?;
        if !stat.is_dir() {
            return upload_file(store, config, path).await;
        }

        let mut children = Vec::new();
        let mut entries = fs::read_dir(&path).await.map_err(traversal)?;
        while let Some(entry) = entries.next_entry().await.map_err(traversal)? {
            children.push(entry.path());
        }

        let mut outcomes: FuturesUnordered<_> = children
            .into_iter()
            .map(|child| visit(store, config, child))
            .collect();

        let mut failure = None;
        while let Some(outcome) = outcomes.next().await {
            if let Err(e) = outcome {
                if failure.is_none() {
                    failure = Some(e);
                } else {
                    warn!(%e, "Further failure in the same directory");
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
    .boxed()
}

async fn upload_file(
    store: &dyn ObjectStore,
    config: &Config,
    path: PathBuf,
) -> Result<(), Error> {
    let key = object_key(&config.prefix, &path)?;

    let contents = read_file(&path).await.map_err(|source| Error::Traversal {
        path: path.clone(),
        source,
    })?;

    store
        .put(&key, &contents)
        .await
        .map_err(|source| Error::Upload { path, source })?;

    if config.verbose {
        info!(%key, "Uploaded to S3");
    }

    Ok(())
}

async fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path).await?;
    let mut contents = vec![];
    let mut tmp = [0_u8; 1024];
    loop {
        match file.read(&mut tmp).await? {
            0 => break,
            n => {
                contents.extend(&tmp[0..n]);
            }
        }
    }

    Ok(contents)
}

/// Key derivation deliberately drops the subtree: only the prefix and the
/// file's base name survive, so same-named files in different subdirectories
/// land on the same key and the last writer wins.
fn object_key(prefix: &str, path: &Path) -> Result<String, Error> {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return Err(Error::Traversal {
            path: path.to_path_buf(),
            source: io::Error::other("file name is not valid UTF-8"),
        });
    };

    Ok(if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{}/{name}", prefix.trim_end_matches('/'))
    })
}
