mod ids;
mod playlist;
mod song;
mod view;

pub use ids::{PlaylistId, SongId, FAVORITES_PLAYLIST_ID};
pub use playlist::{Playlist, FAVORITES_PLAYLIST_NAME};
pub use song::{
    CoverRef, MetadataPatch, Song, SongImport, SourceRef, UNKNOWN_ALBUM, UNKNOWN_ARTIST,
};
pub use view::View;
