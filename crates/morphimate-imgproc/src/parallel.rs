use rayon::prelude::*;

use morphimate_image::Image;

/// Apply a function to each pixel in the image in parallel with two values.
pub fn par_iter_rows_val_two<T1, T2, T3, const C: usize>(
    src1: &Image<T1, C>,
    src2: &Image<T2, C>,
    dst: &mut Image<T3, C>,
    f: impl Fn(&T1, &T2, &mut T3) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
    T3: Clone + Send + Sync,
{
    let stride = C * src1.cols();
    if stride == 0 {
        return;
    }

    src1.as_slice()
        .par_chunks_exact(stride)
        .zip(src2.as_slice().par_chunks_exact(stride))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(stride))
        .for_each(|((src1_chunk, src2_chunk), dst_chunk)| {
            src1_chunk
                .iter()
                .zip(src2_chunk.iter())
                .zip(dst_chunk.iter_mut())
                .for_each(|((src1_pixel, src2_pixel), dst_pixel)| {
                    f(src1_pixel, src2_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each pixel of `dst` in parallel, together with its `(x, y)` position
/// and a per-pixel label.
///
/// `labels` is row-major with one entry per pixel.
pub fn par_iter_rows_labelled<T, L, const C: usize>(
    dst: &mut Image<T, C>,
    labels: &[L],
    f: impl Fn(usize, usize, &L, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
    L: Sync,
{
    let cols = dst.cols();
    if cols == 0 {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .zip(labels.par_chunks_exact(cols))
        .enumerate()
        .for_each(|(y, (dst_chunk, label_chunk))| {
            dst_chunk
                .chunks_exact_mut(C)
                .zip(label_chunk.iter())
                .enumerate()
                .for_each(|(x, (dst_pixel, label))| {
                    f(x, y, label, dst_pixel);
                });
        });
}
