//! Cluster output writer.

use std::io::{self, Write};

use sdp_ingest::HashCorpus;
use sdp_search::Cluster;

/// Write clusters as a tab-separated stream.
///
/// Emits a `id\thash\tcluster` header and one row per (identifier,
/// fingerprint, cluster index) triple, cluster indices dense from 0 in
/// emission order. Rows come out deterministically: clusters as given,
/// fingerprints ascending within a cluster, identifiers sorted within a
/// fingerprint.
pub fn write_clusters(
    mut out: impl Write,
    clusters: &[Cluster],
    corpus: &HashCorpus,
) -> io::Result<()> {
    writeln!(out, "id\thash\tcluster")?;
    for (cluster_index, cluster) in clusters.iter().enumerate() {
        for &hash in cluster {
            for id in corpus.ids_for(hash) {
                writeln!(out, "{id}\t{hash}\t{cluster_index}")?;
            }
        }
    }
    out.flush()
}
